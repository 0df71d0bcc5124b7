//! Filter, sort, and paging criteria for comment listings.

use super::Comment;
use crate::paging::{PageRequest, SortOrder};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Field a comment listing is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentSortField {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Latest update timestamp.
    UpdatedAt,
    /// Content, lexicographically.
    Content,
}

/// Criteria for listing comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentQuery {
    /// Required owning task.
    pub task_id: Option<TaskId>,
    /// Required author.
    pub author_id: Option<UserId>,
    /// Whether soft-deleted comments are listed too.
    pub include_deleted: bool,
    /// Sort field.
    pub sort: CommentSortField,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageRequest,
}

impl CommentQuery {
    /// Returns `true` when `comment` satisfies every filter.
    #[must_use]
    pub fn matches(&self, comment: &Comment) -> bool {
        (self.include_deleted || !comment.is_deleted())
            && self.task_id.is_none_or(|task| comment.task_id() == task)
            && self.author_id.is_none_or(|author| comment.author_id() == author)
    }

    /// Compares two comments in the requested order, breaking ties by id.
    #[must_use]
    pub fn compare(&self, left: &Comment, right: &Comment) -> Ordering {
        let primary = match self.sort {
            CommentSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            CommentSortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
            CommentSortField::Content => left.content().as_str().cmp(right.content().as_str()),
        };
        self.order
            .apply(primary.then_with(|| left.id().cmp(&right.id())))
    }
}
