//! Pure authorisation and limit rules for comments.

use super::{Comment, CommentDomainError};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};

/// Returns `true` when `user_id` wrote the comment.
#[must_use]
pub fn is_author(comment: &Comment, user_id: UserId) -> bool {
    comment.author_id() == user_id
}

/// Rejects changes by anyone but the author.
///
/// # Errors
///
/// Returns [`CommentDomainError::NotAuthor`] when `user_id` did not write the
/// comment.
pub fn ensure_author(comment: &Comment, user_id: UserId) -> Result<(), CommentDomainError> {
    if is_author(comment, user_id) {
        Ok(())
    } else {
        Err(CommentDomainError::NotAuthor {
            comment_id: comment.id(),
            user_id,
        })
    }
}

/// Returns whole minutes elapsed since `created_at`, rounding down.
#[must_use]
pub fn age_in_minutes(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_minutes()
}

/// Returns `true` while the comment is inside its edit window.
///
/// With no window every comment stays editable. The boundary minute is still
/// editable.
#[must_use]
pub fn is_editable(comment: &Comment, now: DateTime<Utc>, window_minutes: Option<u32>) -> bool {
    window_minutes.is_none_or(|minutes| {
        age_in_minutes(comment.created_at(), now) <= i64::from(minutes)
    })
}

/// Rejects an edit after the window has closed.
///
/// # Errors
///
/// Returns [`CommentDomainError::EditWindowClosed`] when [`is_editable`] is
/// `false`.
pub fn ensure_editable(
    comment: &Comment,
    now: DateTime<Utc>,
    window_minutes: Option<u32>,
) -> Result<(), CommentDomainError> {
    match window_minutes {
        Some(minutes) if !is_editable(comment, now, window_minutes) => {
            Err(CommentDomainError::EditWindowClosed {
                comment_id: comment.id(),
                minutes,
            })
        }
        _ => Ok(()),
    }
}

/// Returns `true` while a task holds fewer than `max` comments.
#[must_use]
pub const fn can_add_comment(existing: usize, max: usize) -> bool {
    existing < max
}

/// Rejects a new comment on a full task.
///
/// # Errors
///
/// Returns [`CommentDomainError::LimitReached`] when [`can_add_comment`] is
/// `false`.
pub const fn ensure_capacity(
    task_id: TaskId,
    existing: usize,
    max: usize,
) -> Result<(), CommentDomainError> {
    if can_add_comment(existing, max) {
        Ok(())
    } else {
        Err(CommentDomainError::LimitReached { task_id, max })
    }
}

/// Rejects a reply whose parent sits on another task.
///
/// # Errors
///
/// Returns [`CommentDomainError::ParentTaskMismatch`] when `parent` does not
/// belong to `task_id`.
pub fn ensure_same_task(parent: &Comment, task_id: TaskId) -> Result<(), CommentDomainError> {
    if parent.task_id() == task_id {
        Ok(())
    } else {
        Err(CommentDomainError::ParentTaskMismatch {
            parent_id: parent.id(),
            task_id,
        })
    }
}
