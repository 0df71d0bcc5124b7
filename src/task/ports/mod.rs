//! Port contracts for task persistence.
//!
//! Repositories own soft-delete state, the parent index used for subtask
//! lookups, and the revision check that guards concurrent updates. Other
//! contexts register as [`TaskDependents`] so a purge removes what they keep
//! for the task.

pub mod dependents;
pub mod repository;

pub use dependents::TaskDependents;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
