//! Repository port for attachment metadata.

use crate::attachment::domain::{Attachment, AttachmentDraft, AttachmentId, AttachmentQuery};
use crate::paging::Page;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment repository operations.
pub type AttachmentRepositoryResult<T> = Result<T, AttachmentRepositoryError>;

/// Attachment persistence contract.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Stores new metadata and returns it with its assigned identifier.
    async fn create(&self, draft: AttachmentDraft) -> AttachmentRepositoryResult<Attachment>;

    /// Finds an attachment by identifier.
    async fn find_by_id(&self, id: AttachmentId)
    -> AttachmentRepositoryResult<Option<Attachment>>;

    /// Returns the attachments of a task, oldest upload first.
    async fn find_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>>;

    /// Returns one page of attachments matching `query`.
    async fn list(&self, query: &AttachmentQuery)
    -> AttachmentRepositoryResult<Page<Attachment>>;

    /// Counts the attachments of a task.
    async fn count_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<usize>;

    /// Sums the sizes in bytes of a task's attachments.
    async fn total_size_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<u64>;

    /// Removes an attachment.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentRepositoryError::NotFound`] when the attachment
    /// does not exist.
    async fn delete(&self, id: AttachmentId) -> AttachmentRepositoryResult<()>;

    /// Removes every attachment of a task and returns how many were removed.
    async fn delete_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<usize>;
}

/// Errors returned by attachment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentRepositoryError {
    /// The attachment was not found.
    #[error("attachment not found: {0}")]
    NotFound(AttachmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
