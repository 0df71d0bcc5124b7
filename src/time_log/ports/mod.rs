//! Port contracts for time log persistence.

pub mod repository;

pub use repository::{TimeLogRepository, TimeLogRepositoryError, TimeLogRepositoryResult};
