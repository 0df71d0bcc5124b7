//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a positive integer.
    #[error("invalid task id {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the character limit.
    #[error("task title exceeds {max} character limit")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The task description exceeds the character limit.
    #[error("task description exceeds {max} character limit")]
    DescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// Progress lies outside `0..=100`.
    #[error("progress {0} must be between 0 and 100")]
    InvalidProgress(i64),

    /// The estimated time is not a positive number of minutes.
    #[error("estimated time {0} must be a positive number of minutes")]
    InvalidEstimate(i64),

    /// The scheduled window ends before it starts.
    #[error("scheduled end date {end} must not be before start date {start}")]
    InvalidDateRange {
        /// Scheduled start.
        start: DateTime<Utc>,
        /// Scheduled end.
        end: DateTime<Utc>,
    },

    /// A completed task cannot move back to another status.
    #[error("cannot change status of task {task_id} from DONE to {to}")]
    StatusFrozen {
        /// Task whose status is frozen.
        task_id: TaskId,
        /// Rejected target status.
        to: TaskStatus,
    },

    /// A completed task's priority cannot change.
    #[error("cannot change priority of completed task {0}")]
    PriorityFrozen(TaskId),

    /// A task cannot be its own parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(TaskId),

    /// The task is already soft-deleted.
    #[error("task {0} is already deleted")]
    AlreadyDeleted(TaskId),

    /// The task is not soft-deleted, so it cannot be restored.
    #[error("task {0} is not deleted")]
    NotDeleted(TaskId),
}

impl TaskDomainError {
    /// Returns the request field the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTaskId(_) => Some("id"),
            Self::EmptyTitle | Self::TitleTooLong { .. } => Some("title"),
            Self::DescriptionTooLong { .. } => Some("description"),
            Self::InvalidProgress(_) => Some("progress"),
            Self::InvalidEstimate(_) => Some("estimatedTime"),
            Self::InvalidDateRange { .. } => Some("scheduledEndDate"),
            Self::StatusFrozen { .. } => Some("status"),
            Self::PriorityFrozen(_) => Some("priority"),
            Self::SelfParent(_) => Some("parentId"),
            Self::AlreadyDeleted(_) | Self::NotDeleted(_) => None,
        }
    }
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
