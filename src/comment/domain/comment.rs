//! Comment entity and the data needed to create one.

use super::{CommentContent, CommentDomainError, CommentId};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated data for a comment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    task_id: TaskId,
    author_id: UserId,
    content: CommentContent,
    parent_id: Option<CommentId>,
    created_at: DateTime<Utc>,
}

impl CommentDraft {
    /// Creates a root-level draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        author_id: UserId,
        content: CommentContent,
        clock: &impl Clock,
    ) -> Self {
        Self {
            task_id,
            author_id,
            content,
            parent_id: None,
            created_at: clock.utc(),
        }
    }

    /// Makes the draft a reply to `parent_id`.
    #[must_use]
    pub fn replying_to(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Returns the task the comment is posted on.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the comment being replied to, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }
}

/// A comment on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: UserId,
    content: CommentContent,
    parent_id: Option<CommentId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted identifier.
    pub id: CommentId,
    /// Persisted owning task.
    pub task_id: TaskId,
    /// Persisted author.
    pub author_id: UserId,
    /// Persisted content.
    pub content: CommentContent,
    /// Persisted reply target, if any.
    pub parent_id: Option<CommentId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Materialises a draft under the identifier assigned by storage.
    #[must_use]
    pub fn from_draft(id: CommentId, draft: CommentDraft) -> Self {
        Self {
            id,
            task_id: draft.task_id,
            author_id: draft.author_id,
            content: draft.content,
            parent_id: draft.parent_id,
            created_at: draft.created_at,
            updated_at: draft.created_at,
            deleted_at: None,
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author_id: data.author_id,
            content: data.content,
            parent_id: data.parent_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the sanitised content.
    #[must_use]
    pub const fn content(&self) -> &CommentContent {
        &self.content
    }

    /// Returns the comment being replied to, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    /// Returns `true` for a root comment.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-delete marker.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the comment is soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Replaces the content.
    pub fn edit(&mut self, content: CommentContent, clock: &impl Clock) {
        self.content = content;
        self.updated_at = clock.utc();
    }

    /// Marks the comment as soft-deleted at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::AlreadyDeleted`] when it is already
    /// deleted.
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) -> Result<(), CommentDomainError> {
        if self.is_deleted() {
            return Err(CommentDomainError::AlreadyDeleted(self.id));
        }
        self.deleted_at = Some(at);
        self.updated_at = at;
        Ok(())
    }

    /// Clears the soft-delete marker.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::NotDeleted`] when the comment is active.
    pub fn restore(&mut self, at: DateTime<Utc>) -> Result<(), CommentDomainError> {
        if !self.is_deleted() {
            return Err(CommentDomainError::NotDeleted(self.id));
        }
        self.deleted_at = None;
        self.updated_at = at;
        Ok(())
    }
}
