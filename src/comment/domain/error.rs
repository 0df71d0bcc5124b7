//! Error types for comment validation and policy checks.

use super::CommentId;
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or changing comments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The comment identifier is not a positive integer.
    #[error("invalid comment id {0}, expected a positive integer")]
    InvalidCommentId(i64),

    /// The content is empty once sanitised.
    #[error("comment content must not be empty")]
    EmptyContent,

    /// The content exceeds the configured character limit.
    #[error("comment content exceeds {max} character limit")]
    ContentTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// Someone other than the author tried to change the comment.
    #[error("user {user_id} is not the author of comment {comment_id}")]
    NotAuthor {
        /// Comment being changed.
        comment_id: CommentId,
        /// User who attempted the change.
        user_id: UserId,
    },

    /// The edit window after creation has passed.
    #[error("comment {comment_id} can only be edited within {minutes} minutes of creation")]
    EditWindowClosed {
        /// Comment being edited.
        comment_id: CommentId,
        /// Length of the edit window.
        minutes: u32,
    },

    /// The reply target belongs to another task.
    #[error("parent comment {parent_id} does not belong to task {task_id}")]
    ParentTaskMismatch {
        /// Rejected parent comment.
        parent_id: CommentId,
        /// Task the reply is posted on.
        task_id: TaskId,
    },

    /// The task already holds the maximum number of comments.
    #[error("task {task_id} already has the maximum of {max} comments")]
    LimitReached {
        /// Task the comment is posted on.
        task_id: TaskId,
        /// Configured limit.
        max: usize,
    },

    /// The comment is already soft-deleted.
    #[error("comment {0} is already deleted")]
    AlreadyDeleted(CommentId),

    /// The comment is not soft-deleted, so it cannot be restored.
    #[error("comment {0} is not deleted and cannot be restored")]
    NotDeleted(CommentId),
}

impl CommentDomainError {
    /// Returns the request field the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCommentId(_) => Some("id"),
            Self::EmptyContent | Self::ContentTooLong { .. } => Some("content"),
            Self::ParentTaskMismatch { .. } => Some("parentId"),
            Self::NotAuthor { .. }
            | Self::EditWindowClosed { .. }
            | Self::LimitReached { .. }
            | Self::AlreadyDeleted(_)
            | Self::NotDeleted(_) => None,
        }
    }
}
