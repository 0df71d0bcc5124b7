//! Service layer for posting, editing, and threading task comments.

use crate::comment::{
    domain::{
        Comment, CommentContent, CommentDomainError, CommentDraft, CommentId, CommentQuery,
        CommentThread, assemble_threads, policy,
    },
    ports::{CommentRepository, CommentRepositoryError},
};
use crate::config::CommentSettings;
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

/// Request payload for posting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    task_id: TaskId,
    author_id: UserId,
    content: String,
    parent_id: Option<CommentId>,
}

impl CreateCommentRequest {
    /// Creates a request for a root comment.
    #[must_use]
    pub fn new(task_id: TaskId, author_id: UserId, content: impl Into<String>) -> Self {
        Self {
            task_id,
            author_id,
            content: content.into(),
            parent_id: None,
        }
    }

    /// Posts the comment as a reply to `parent_id`.
    #[must_use]
    pub const fn replying_to(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// Domain validation or policy failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),
    /// Comment repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// The comment does not exist or is soft-deleted.
    #[error("comment with id {0} not found")]
    NotFound(CommentId),
    /// The task does not exist or is soft-deleted.
    #[error("task with id {0} not found")]
    TaskNotFound(TaskId),
    /// The reply target does not exist or is soft-deleted.
    #[error("parent comment with id {0} not found")]
    ParentNotFound(CommentId),
}

impl Classify for CommentServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(CommentDomainError::NotAuthor { .. }) => ErrorKind::Forbidden,
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_)
            | Self::TaskNotFound(_)
            | Self::ParentNotFound(_)
            | Self::Repository(CommentRepositoryError::NotFound(_))
            | Self::Task(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Task(TaskRepositoryError::RevisionConflict { .. }) => ErrorKind::Conflict,
            Self::Repository(CommentRepositoryError::Persistence(_))
            | Self::Task(TaskRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// Comment orchestration service.
pub struct CommentService<R, T, C>
where
    R: CommentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    comments: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
    settings: CommentSettings,
}

impl<R, T, C> Clone for CommentService<R, T, C>
where
    R: CommentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            comments: Arc::clone(&self.comments),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
            settings: self.settings.clone(),
        }
    }
}

impl<R, T, C> CommentService<R, T, C>
where
    R: CommentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a comment service with the given rules.
    #[must_use]
    pub const fn new(
        comments: Arc<R>,
        tasks: Arc<T>,
        clock: Arc<C>,
        settings: CommentSettings,
    ) -> Self {
        Self {
            comments,
            tasks,
            clock,
            settings,
        }
    }

    /// Returns the rules this service enforces.
    #[must_use]
    pub const fn settings(&self) -> &CommentSettings {
        &self.settings
    }

    /// Posts a comment on an active task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::TaskNotFound`] when the task is missing
    /// or deleted, [`CommentServiceError::Domain`] for invalid content, a full
    /// task, or a parent on another task,
    /// [`CommentServiceError::ParentNotFound`] for a missing parent, or a
    /// repository error when persistence fails.
    pub async fn create_comment(
        &self,
        request: CreateCommentRequest,
    ) -> CommentServiceResult<Comment> {
        let CreateCommentRequest {
            task_id,
            author_id,
            content,
            parent_id,
        } = request;
        debug!(task_id = %task_id, author_id = %author_id, "creating comment");
        let body = CommentContent::new(&content, self.settings.max_content_chars)?;
        self.require_task(task_id).await?;

        let existing = self.comments.count_by_task(task_id).await?;
        policy::ensure_capacity(task_id, existing, self.settings.max_per_task).inspect_err(
            |err| warn!(task_id = %task_id, error = %err, "comment limit reached"),
        )?;

        let mut draft = CommentDraft::new(task_id, author_id, body, &*self.clock);
        if let Some(parent) = parent_id {
            let parent_comment = self
                .comments
                .find_by_id(parent)
                .await?
                .ok_or(CommentServiceError::ParentNotFound(parent))
                .inspect_err(|_| warn!(parent_id = %parent, "parent comment not found"))?;
            policy::ensure_same_task(&parent_comment, task_id).inspect_err(|err| {
                warn!(task_id = %task_id, error = %err, "reply parent rejected");
            })?;
            draft = draft.replying_to(parent);
        }

        let comment = self.comments.create(draft).await?;
        info!(
            comment_id = %comment.id(),
            task_id = %task_id,
            is_reply = !comment.is_root(),
            "comment created"
        );
        Ok(comment)
    }

    /// Retrieves an active comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] when the comment is missing
    /// or deleted.
    pub async fn get_comment(&self, id: CommentId) -> CommentServiceResult<Comment> {
        self.find_active(id).await
    }

    /// Lists comments matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] when lookup fails.
    pub async fn list_comments(&self, query: &CommentQuery) -> CommentServiceResult<Page<Comment>> {
        Ok(self.comments.list(query).await?)
    }

    /// Returns the active comments of a task grouped into reply threads.
    ///
    /// Threads are one level deep. A reply to a reply is counted in its
    /// parent reply's `reply_count` but is not part of the view; use
    /// [`Self::list_comments`] to fetch it.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::TaskNotFound`] when the task is missing
    /// or deleted.
    pub async fn threaded_comments(
        &self,
        task_id: TaskId,
    ) -> CommentServiceResult<Vec<CommentThread>> {
        self.require_task(task_id).await?;
        let comments = self.comments.find_by_task(task_id).await?;
        Ok(assemble_threads(&comments, self.settings.orphan_policy))
    }

    /// Replaces the content of a comment on behalf of its author.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] when the comment is missing,
    /// or [`CommentServiceError::Domain`] when the user is not the author,
    /// the edit window has closed, or the content is invalid.
    pub async fn update_comment(
        &self,
        id: CommentId,
        user_id: UserId,
        content: &str,
    ) -> CommentServiceResult<Comment> {
        debug!(comment_id = %id, user_id = %user_id, "updating comment");
        let mut comment = self.find_active(id).await?;
        policy::ensure_author(&comment, user_id)
            .and_then(|()| {
                policy::ensure_editable(
                    &comment,
                    self.clock.utc(),
                    self.settings.edit_window_minutes,
                )
            })
            .inspect_err(|err| warn!(comment_id = %id, error = %err, "comment edit rejected"))?;
        let body = CommentContent::new(content, self.settings.max_content_chars)?;

        comment.edit(body, &*self.clock);
        self.comments.update(&comment).await?;
        info!(comment_id = %id, "comment updated");
        Ok(comment)
    }

    /// Soft-deletes a comment on behalf of its author.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] when the comment does not
    /// exist, or [`CommentServiceError::Domain`] when the user is not the
    /// author or the comment is already deleted.
    pub async fn delete_comment(
        &self,
        id: CommentId,
        user_id: UserId,
    ) -> CommentServiceResult<Comment> {
        let mut comment = self.find_any(id).await?;
        policy::ensure_author(&comment, user_id)
            .and_then(|()| comment.mark_deleted(self.clock.utc()))
            .inspect_err(|err| warn!(comment_id = %id, error = %err, "comment delete rejected"))?;
        self.comments.update(&comment).await?;
        info!(comment_id = %id, "comment soft-deleted");
        Ok(comment)
    }

    /// Restores a soft-deleted comment on behalf of its author.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] when the comment does not
    /// exist, or [`CommentServiceError::Domain`] when the user is not the
    /// author or the comment is not deleted.
    pub async fn restore_comment(
        &self,
        id: CommentId,
        user_id: UserId,
    ) -> CommentServiceResult<Comment> {
        let mut comment = self.find_any(id).await?;
        policy::ensure_author(&comment, user_id)
            .and_then(|()| comment.restore(self.clock.utc()))
            .inspect_err(|err| warn!(comment_id = %id, error = %err, "comment restore rejected"))?;
        self.comments.update(&comment).await?;
        info!(comment_id = %id, "comment restored");
        Ok(comment)
    }

    /// Counts the active comments of a task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] when lookup fails.
    pub async fn count_comments(&self, task_id: TaskId) -> CommentServiceResult<usize> {
        Ok(self.comments.count_by_task(task_id).await?)
    }

    async fn require_task(&self, task_id: TaskId) -> CommentServiceResult<()> {
        if self.tasks.find_by_id(task_id).await?.is_none() {
            warn!(task_id = %task_id, "task not found for comment");
            return Err(CommentServiceError::TaskNotFound(task_id));
        }
        Ok(())
    }

    async fn find_active(&self, id: CommentId) -> CommentServiceResult<Comment> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or(CommentServiceError::NotFound(id))
    }

    async fn find_any(&self, id: CommentId) -> CommentServiceResult<Comment> {
        self.comments
            .find_by_id_including_deleted(id)
            .await?
            .ok_or(CommentServiceError::NotFound(id))
    }
}

#[async_trait]
impl<R, T, C> TaskDependents for CommentService<R, T, C>
where
    R: CommentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn label(&self) -> &'static str {
        "comments"
    }

    async fn purge_task(&self, task_id: TaskId) -> TaskRepositoryResult<usize> {
        self.comments
            .delete_by_task(task_id)
            .await
            .map_err(TaskRepositoryError::persistence)
    }
}
