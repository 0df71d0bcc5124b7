//! Repository port for comment persistence and lookup.

use crate::comment::domain::{Comment, CommentDraft, CommentId, CommentQuery};
use crate::paging::Page;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment and returns it with its assigned identifier.
    async fn create(&self, draft: CommentDraft) -> CommentRepositoryResult<Comment>;

    /// Persists changes to an existing comment, including its soft-delete
    /// marker.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when the comment does not
    /// exist.
    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Finds an active comment by identifier.
    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>>;

    /// Finds a comment by identifier whether or not it is soft-deleted.
    async fn find_by_id_including_deleted(
        &self,
        id: CommentId,
    ) -> CommentRepositoryResult<Option<Comment>>;

    /// Returns the active comments of a task, oldest first.
    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>>;

    /// Returns one page of comments matching `query`.
    async fn list(&self, query: &CommentQuery) -> CommentRepositoryResult<Page<Comment>>;

    /// Counts the active comments of a task.
    async fn count_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize>;

    /// Removes every comment of a task, soft-deleted ones included, and
    /// returns how many were removed.
    async fn delete_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// The comment was not found.
    #[error("comment not found: {0}")]
    NotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
