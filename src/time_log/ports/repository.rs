//! Repository port for time log persistence and lookup.

use crate::paging::Page;
use crate::task::domain::TaskId;
use crate::time_log::domain::{TimeLog, TimeLogDraft, TimeLogId, TimeLogQuery};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for time log repository operations.
pub type TimeLogRepositoryResult<T> = Result<T, TimeLogRepositoryError>;

/// Time log persistence contract.
#[async_trait]
pub trait TimeLogRepository: Send + Sync {
    /// Stores a new log and returns it with its assigned identifier.
    async fn create(&self, draft: TimeLogDraft) -> TimeLogRepositoryResult<TimeLog>;

    /// Persists changes to an existing log.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogRepositoryError::NotFound`] when the log does not
    /// exist.
    async fn update(&self, log: &TimeLog) -> TimeLogRepositoryResult<()>;

    /// Finds a log by identifier.
    async fn find_by_id(&self, id: TimeLogId) -> TimeLogRepositoryResult<Option<TimeLog>>;

    /// Returns the logs of a task, earliest start first.
    async fn find_by_task(&self, task_id: TaskId) -> TimeLogRepositoryResult<Vec<TimeLog>>;

    /// Returns every log of a user, earliest start first.
    async fn find_by_user(&self, user_id: UserId) -> TimeLogRepositoryResult<Vec<TimeLog>>;

    /// Returns the running logs of a user.
    async fn find_active_by_user(&self, user_id: UserId)
    -> TimeLogRepositoryResult<Vec<TimeLog>>;

    /// Returns one page of logs matching `query`.
    async fn list(&self, query: &TimeLogQuery) -> TimeLogRepositoryResult<Page<TimeLog>>;

    /// Removes a log.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogRepositoryError::NotFound`] when the log does not
    /// exist.
    async fn delete(&self, id: TimeLogId) -> TimeLogRepositoryResult<()>;

    /// Removes every log of a task and returns how many were removed.
    async fn delete_by_task(&self, task_id: TaskId) -> TimeLogRepositoryResult<usize>;
}

/// Errors returned by time log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TimeLogRepositoryError {
    /// The log was not found.
    #[error("time log not found: {0}")]
    NotFound(TimeLogId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TimeLogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
