//! Port contracts for attachment persistence.

pub mod repository;

pub use repository::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult};
