//! Pure task lifecycle rules.
//!
//! Every predicate here is total, side-effect free, and independent of
//! persistence. Predicates that can reject a request also have an `ensure_*`
//! form returning a [`TaskDomainError`] that names the rejected field.

use super::{EisenhowerQuadrant, TaskDomainError, TaskId, TaskStatus};
use chrono::{DateTime, Utc};

/// Maps importance and urgency onto the Eisenhower quadrant.
///
/// `(true, true)` is quadrant 1, `(true, false)` is 2, `(false, true)` is 3,
/// and `(false, false)` is 4.
#[must_use]
pub const fn calculate_eisenhower_quadrant(importance: bool, urgency: bool) -> EisenhowerQuadrant {
    EisenhowerQuadrant::from_flags(importance, urgency)
}

/// Returns `false` only when a completed task would leave `DONE`.
///
/// `DONE` to `DONE` is an idempotent no-op and is allowed.
#[must_use]
pub const fn can_update_status(current: TaskStatus, next: TaskStatus) -> bool {
    !matches!(current, TaskStatus::Done) || matches!(next, TaskStatus::Done)
}

/// Returns `false` when the task is completed; its priority is frozen.
#[must_use]
pub const fn can_update_priority(status: TaskStatus) -> bool {
    !matches!(status, TaskStatus::Done)
}

/// Returns `true` when `progress` lies in `0..=100`.
#[must_use]
pub const fn is_valid_progress(progress: i64) -> bool {
    progress >= 0 && progress <= 100
}

/// Returns `true` unless both bounds are present and `start > end`.
#[must_use]
pub fn is_valid_date_range(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    match (start, end) {
        (Some(from), Some(to)) => from <= to,
        _ => true,
    }
}

/// Returns `true` when a due date is present and already in the past.
#[must_use]
pub fn is_overdue(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    due_date.is_some_and(|due| due < now)
}

/// Rejects a status change out of `DONE`.
///
/// # Errors
///
/// Returns [`TaskDomainError::StatusFrozen`] when [`can_update_status`] is
/// `false`.
pub const fn ensure_status_change(
    task_id: TaskId,
    current: TaskStatus,
    next: TaskStatus,
) -> Result<(), TaskDomainError> {
    if can_update_status(current, next) {
        Ok(())
    } else {
        Err(TaskDomainError::StatusFrozen { task_id, to: next })
    }
}

/// Rejects a priority change on a completed task.
///
/// # Errors
///
/// Returns [`TaskDomainError::PriorityFrozen`] when [`can_update_priority`]
/// is `false`.
pub const fn ensure_priority_change(
    task_id: TaskId,
    status: TaskStatus,
) -> Result<(), TaskDomainError> {
    if can_update_priority(status) {
        Ok(())
    } else {
        Err(TaskDomainError::PriorityFrozen(task_id))
    }
}

/// Rejects a schedule window that ends before it starts.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDateRange`] when [`is_valid_date_range`]
/// is `false`.
pub fn ensure_date_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), TaskDomainError> {
    match (start, end) {
        (Some(from), Some(to)) if !is_valid_date_range(start, end) => {
            Err(TaskDomainError::InvalidDateRange {
                start: from,
                end: to,
            })
        }
        _ => Ok(()),
    }
}
