//! Port for records that other contexts keep against a task.

use crate::task::{domain::TaskId, ports::TaskRepositoryResult};
use async_trait::async_trait;

/// Storage owned by another context that must go when a task is purged.
#[async_trait]
pub trait TaskDependents: Send + Sync {
    /// Short label used in log events, such as `"comments"`.
    fn label(&self) -> &'static str;

    /// Removes every record kept for `task_id` and returns how many were
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::ports::TaskRepositoryError::Persistence`] when
    /// the owning store fails.
    async fn purge_task(&self, task_id: TaskId) -> TaskRepositoryResult<usize>;
}
