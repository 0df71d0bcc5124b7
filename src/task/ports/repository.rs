//! Repository port for task persistence, lookup, and soft-delete lifecycle.

use crate::paging::Page;
use crate::task::domain::{Task, TaskDraft, TaskId, TaskQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Lookups by identifier ignore soft-deleted tasks unless the method name says
/// otherwise.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task>;

    /// Persists changes to an existing task and returns the stored version.
    ///
    /// The write succeeds only when the stored revision still equals
    /// `task.revision()`; the returned task carries the next revision.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::RevisionConflict`] when another write landed
    /// first.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds an active task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by identifier whether or not it is soft-deleted.
    async fn find_by_id_including_deleted(&self, id: TaskId)
    -> TaskRepositoryResult<Option<Task>>;

    /// Returns the active direct subtasks of `parent_id` in identifier order.
    async fn find_children(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one page of tasks matching `query`; `now` decides overdue.
    async fn list(&self, query: &TaskQuery, now: DateTime<Utc>)
    -> TaskRepositoryResult<Page<Task>>;

    /// Marks an active task as soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no active task has the
    /// identifier.
    async fn soft_delete(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<Task>;

    /// Clears the soft-delete marker of a deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no soft-deleted task has
    /// the identifier.
    async fn restore(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<Task>;

    /// Removes a task permanently and detaches its subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn permanent_delete(&self, id: TaskId, at: DateTime<Utc>) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task changed since it was read.
    #[error("task {id} was modified concurrently: expected revision {expected}, found {actual}")]
    RevisionConflict {
        /// Task that was written.
        id: TaskId,
        /// Revision the writer read.
        expected: u64,
        /// Revision currently stored.
        actual: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
