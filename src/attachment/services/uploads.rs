//! Service layer for attachment uploads and removal.

use crate::attachment::{
    domain::{
        Attachment, AttachmentDomainError, AttachmentDraft, AttachmentId, AttachmentQuery,
        FileName, FilePath, rules, safe_file_name,
    },
    ports::{AttachmentRepository, AttachmentRepositoryError},
};
use crate::config::AttachmentLimits;
use crate::error::{Classify, ErrorKind};
use crate::paging::Page;
use crate::task::{
    domain::TaskId,
    ports::{TaskDependents, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Request payload describing an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAttachmentRequest {
    task_id: TaskId,
    uploaded_by: UserId,
    file_name: String,
    file_size: u64,
    file_type: String,
    file_path: String,
}

impl CreateAttachmentRequest {
    /// Creates an upload request.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        uploaded_by: UserId,
        file_name: impl Into<String>,
        file_size: u64,
        file_type: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            task_id,
            uploaded_by,
            file_name: file_name.into(),
            file_size,
            file_type: file_type.into(),
            file_path: file_path.into(),
        }
    }
}

/// Service-level errors for attachment operations.
#[derive(Debug, Error)]
pub enum AttachmentServiceError {
    /// Domain validation or an upload limit failed.
    #[error(transparent)]
    Domain(#[from] AttachmentDomainError),
    /// Attachment repository operation failed.
    #[error(transparent)]
    Repository(#[from] AttachmentRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// The attachment does not exist.
    #[error("attachment with id {0} not found")]
    NotFound(AttachmentId),
    /// The task does not exist.
    #[error("task with id {0} not found")]
    TaskNotFound(TaskId),
    /// The task is soft-deleted, so nothing can be attached to it.
    #[error("cannot attach files to deleted task {0}")]
    TaskDeleted(TaskId),
}

impl Classify for AttachmentServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(AttachmentDomainError::NotUploader { .. }) => ErrorKind::Forbidden,
            Self::Domain(_) | Self::TaskDeleted(_) => ErrorKind::Validation,
            Self::NotFound(_)
            | Self::TaskNotFound(_)
            | Self::Repository(AttachmentRepositoryError::NotFound(_))
            | Self::Task(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Task(TaskRepositoryError::RevisionConflict { .. }) => ErrorKind::Conflict,
            Self::Repository(AttachmentRepositoryError::Persistence(_))
            | Self::Task(TaskRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for attachment service operations.
pub type AttachmentServiceResult<T> = Result<T, AttachmentServiceError>;

/// Attachment orchestration service.
pub struct AttachmentService<R, T, C>
where
    R: AttachmentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    attachments: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
    limits: AttachmentLimits,
}

impl<R, T, C> Clone for AttachmentService<R, T, C>
where
    R: AttachmentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            attachments: Arc::clone(&self.attachments),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
            limits: self.limits.clone(),
        }
    }
}

impl<R, T, C> AttachmentService<R, T, C>
where
    R: AttachmentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates an attachment service enforcing `limits`.
    #[must_use]
    pub const fn new(
        attachments: Arc<R>,
        tasks: Arc<T>,
        clock: Arc<C>,
        limits: AttachmentLimits,
    ) -> Self {
        Self {
            attachments,
            tasks,
            clock,
            limits,
        }
    }

    /// Returns the limits this service enforces.
    #[must_use]
    pub const fn limits(&self) -> &AttachmentLimits {
        &self.limits
    }

    /// Checks whether a file could be attached to a task, without storing
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::TaskNotFound`] or
    /// [`AttachmentServiceError::TaskDeleted`] for an unusable task, or
    /// [`AttachmentServiceError::Domain`] when the type, size, or a per-task
    /// cap rejects the file.
    pub async fn check_upload(
        &self,
        task_id: TaskId,
        file_type: &str,
        file_size: u64,
    ) -> AttachmentServiceResult<()> {
        self.require_open_task(task_id).await?;
        rules::ensure_acceptable_file(&self.limits, file_type, file_size).inspect_err(|err| {
            warn!(task_id = %task_id, error = %err, "attachment rejected");
        })?;
        let count = self.attachments.count_by_task(task_id).await?;
        let total = self.attachments.total_size_by_task(task_id).await?;
        rules::ensure_task_capacity(&self.limits, task_id, count, total, file_size).inspect_err(
            |err| warn!(task_id = %task_id, error = %err, "attachment limit reached"),
        )?;
        Ok(())
    }

    /// Stores metadata for an uploaded file under a safe generated name.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::Domain`] for an invalid name or path,
    /// and every error of [`Self::check_upload`].
    pub async fn create_attachment(
        &self,
        request: CreateAttachmentRequest,
    ) -> AttachmentServiceResult<Attachment> {
        let CreateAttachmentRequest {
            task_id,
            uploaded_by,
            file_name,
            file_size,
            file_type,
            file_path,
        } = request;
        debug!(task_id = %task_id, uploaded_by = %uploaded_by, "creating attachment");
        let original_name = FileName::new(file_name)?;
        let path = FilePath::new(file_path)?;
        self.check_upload(task_id, &file_type, file_size).await?;

        let uploaded_at = self.clock.utc();
        let stored_name = safe_file_name(
            original_name.as_str(),
            uploaded_at.timestamp_millis(),
            &Uuid::new_v4().simple().to_string(),
        );
        let attachment = self
            .attachments
            .create(AttachmentDraft {
                task_id,
                uploaded_by,
                original_name,
                stored_name,
                file_size,
                file_type,
                file_path: path,
                uploaded_at,
            })
            .await?;
        info!(
            attachment_id = %attachment.id(),
            task_id = %task_id,
            file_size,
            "attachment created"
        );
        Ok(attachment)
    }

    /// Retrieves an attachment.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::NotFound`] when it does not exist.
    pub async fn get_attachment(&self, id: AttachmentId) -> AttachmentServiceResult<Attachment> {
        self.attachments
            .find_by_id(id)
            .await?
            .ok_or(AttachmentServiceError::NotFound(id))
    }

    /// Lists attachments matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::Repository`] when lookup fails.
    pub async fn list_attachments(
        &self,
        query: &AttachmentQuery,
    ) -> AttachmentServiceResult<Page<Attachment>> {
        Ok(self.attachments.list(query).await?)
    }

    /// Lists the attachments of a task, including a soft-deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn list_task_attachments(
        &self,
        task_id: TaskId,
    ) -> AttachmentServiceResult<Vec<Attachment>> {
        if self
            .tasks
            .find_by_id_including_deleted(task_id)
            .await?
            .is_none()
        {
            return Err(AttachmentServiceError::TaskNotFound(task_id));
        }
        Ok(self.attachments.find_by_task(task_id).await?)
    }

    /// Deletes an attachment on behalf of its uploader.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::NotFound`] when it does not exist, or
    /// [`AttachmentServiceError::Domain`] when `user_id` did not upload it.
    pub async fn delete_attachment(
        &self,
        id: AttachmentId,
        user_id: UserId,
    ) -> AttachmentServiceResult<()> {
        let attachment = self.get_attachment(id).await?;
        rules::ensure_can_delete(&attachment, user_id).inspect_err(|err| {
            warn!(attachment_id = %id, error = %err, "attachment delete rejected");
        })?;
        self.attachments.delete(id).await?;
        info!(attachment_id = %id, "attachment deleted");
        Ok(())
    }

    async fn require_open_task(&self, task_id: TaskId) -> AttachmentServiceResult<()> {
        let task = self
            .tasks
            .find_by_id_including_deleted(task_id)
            .await?
            .ok_or(AttachmentServiceError::TaskNotFound(task_id))?;
        if task.is_deleted() {
            warn!(task_id = %task_id, "cannot attach files to deleted task");
            return Err(AttachmentServiceError::TaskDeleted(task_id));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, T, C> TaskDependents for AttachmentService<R, T, C>
where
    R: AttachmentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn label(&self) -> &'static str {
        "attachments"
    }

    async fn purge_task(&self, task_id: TaskId) -> TaskRepositoryResult<usize> {
        self.attachments
            .delete_by_task(task_id)
            .await
            .map_err(TaskRepositoryError::persistence)
    }
}
