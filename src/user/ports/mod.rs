//! Port contracts for user account persistence.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
