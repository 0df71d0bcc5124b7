//! Filter, sort, and paging criteria for task listings.

use super::{EisenhowerQuadrant, Priority, Progress, Task, TaskId, TaskStatus};
use crate::paging::{PageRequest, SortOrder};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which side of the soft-delete marker a listing covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletedFilter {
    /// Only active tasks.
    #[default]
    ActiveOnly,
    /// Active and soft-deleted tasks.
    IncludeDeleted,
    /// Only soft-deleted tasks.
    DeletedOnly,
}

impl DeletedFilter {
    /// Returns `true` when a task with this deletion state is included.
    #[must_use]
    pub const fn admits(self, deleted: bool) -> bool {
        match self {
            Self::ActiveOnly => !deleted,
            Self::IncludeDeleted => true,
            Self::DeletedOnly => deleted,
        }
    }
}

/// Field a task listing is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSortField {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Latest update timestamp.
    UpdatedAt,
    /// Due date; tasks without one sort before dated tasks in ascending order.
    DueDate,
    /// Priority, low to high in ascending order.
    Priority,
    /// Title, case-insensitively.
    Title,
    /// Progress.
    Progress,
}

/// Criteria for listing tasks.
///
/// Every `None` filter admits all tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Required status.
    pub status: Option<TaskStatus>,
    /// Required priority.
    pub priority: Option<Priority>,
    /// Required Eisenhower quadrant.
    pub quadrant: Option<EisenhowerQuadrant>,
    /// Required importance flag.
    pub importance: Option<bool>,
    /// Required urgency flag.
    pub urgency: Option<bool>,
    /// Required parent task.
    pub parent_id: Option<TaskId>,
    /// Required creator.
    pub created_by: Option<UserId>,
    /// Required assignee.
    pub assigned_to: Option<UserId>,
    /// Case-insensitive substring of the title or description.
    pub search: Option<String>,
    /// Required overdue state.
    pub overdue: Option<bool>,
    /// Inclusive lower progress bound.
    pub min_progress: Option<Progress>,
    /// Inclusive upper progress bound.
    pub max_progress: Option<Progress>,
    /// Inclusive lower due-date bound.
    pub due_after: Option<DateTime<Utc>>,
    /// Inclusive upper due-date bound.
    pub due_before: Option<DateTime<Utc>>,
    /// Soft-delete visibility.
    pub deleted: DeletedFilter,
    /// Sort field.
    pub sort: TaskSortField,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageRequest,
}

impl TaskQuery {
    /// Returns `true` when `task` satisfies every filter.
    ///
    /// `now` decides the overdue filter.
    #[must_use]
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        self.deleted.admits(task.is_deleted())
            && self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.quadrant.is_none_or(|quadrant| task.quadrant() == quadrant)
            && self.importance.is_none_or(|flag| task.importance() == flag)
            && self.urgency.is_none_or(|flag| task.urgency() == flag)
            && self.parent_id.is_none_or(|parent| task.parent_id() == Some(parent))
            && self.created_by.is_none_or(|user| task.created_by() == user)
            && self.assigned_to.is_none_or(|user| task.assigned_to() == Some(user))
            && self.overdue.is_none_or(|flag| task.is_overdue(now) == flag)
            && self.min_progress.is_none_or(|min| task.progress() >= min)
            && self.max_progress.is_none_or(|max| task.progress() <= max)
            && self.matches_due_range(task)
            && self.matches_search(task)
    }

    /// Compares two tasks in the requested sort order, breaking ties by id.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let primary = match self.sort {
            TaskSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            TaskSortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
            TaskSortField::DueDate => left.due_date().cmp(&right.due_date()),
            TaskSortField::Priority => left.priority().cmp(&right.priority()),
            TaskSortField::Title => left
                .title()
                .as_str()
                .to_lowercase()
                .cmp(&right.title().as_str().to_lowercase()),
            TaskSortField::Progress => left.progress().cmp(&right.progress()),
        };
        self.order
            .apply(primary.then_with(|| left.id().cmp(&right.id())))
    }

    fn matches_due_range(&self, task: &Task) -> bool {
        if self.due_after.is_none() && self.due_before.is_none() {
            return true;
        }
        task.due_date().is_some_and(|due| {
            self.due_after.is_none_or(|after| due >= after)
                && self.due_before.is_none_or(|before| due <= before)
        })
    }

    fn matches_search(&self, task: &Task) -> bool {
        let Some(raw) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if raw.is_empty() {
            return true;
        }
        let needle = raw.to_lowercase();
        task.title().as_str().to_lowercase().contains(&needle)
            || task
                .description()
                .is_some_and(|text| text.as_str().to_lowercase().contains(&needle))
    }
}
