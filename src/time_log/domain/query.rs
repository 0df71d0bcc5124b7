//! Filter, sort, and paging criteria for time log listings.

use super::TimeLog;
use crate::paging::{PageRequest, SortOrder};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Field a time log listing is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLogSortField {
    /// Start time.
    #[default]
    StartedAt,
    /// End time; running logs sort first ascending.
    EndedAt,
    /// Duration; running logs sort first ascending.
    Duration,
    /// Creation timestamp.
    CreatedAt,
}

/// Criteria for listing time logs.
///
/// Range bounds are inclusive. A running log never matches an end-time bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeLogQuery {
    /// Required task.
    pub task_id: Option<TaskId>,
    /// Required user.
    pub user_id: Option<UserId>,
    /// Earliest start time.
    pub started_from: Option<DateTime<Utc>>,
    /// Latest start time.
    pub started_to: Option<DateTime<Utc>>,
    /// Earliest end time.
    pub ended_from: Option<DateTime<Utc>>,
    /// Latest end time.
    pub ended_to: Option<DateTime<Utc>>,
    /// Sort field.
    pub sort: TimeLogSortField,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageRequest,
}

impl TimeLogQuery {
    /// Returns `true` when `log` satisfies every filter.
    #[must_use]
    pub fn matches(&self, log: &TimeLog) -> bool {
        let started = log.started_at();
        self.task_id.is_none_or(|task| log.task_id() == task)
            && self.user_id.is_none_or(|user| log.user_id() == user)
            && self.started_from.is_none_or(|from| started >= from)
            && self.started_to.is_none_or(|to| started <= to)
            && self
                .ended_from
                .is_none_or(|from| log.ended_at().is_some_and(|end| end >= from))
            && self
                .ended_to
                .is_none_or(|to| log.ended_at().is_some_and(|end| end <= to))
    }

    /// Compares two logs in the requested order, breaking ties by id.
    #[must_use]
    pub fn compare(&self, left: &TimeLog, right: &TimeLog) -> Ordering {
        let primary = match self.sort {
            TimeLogSortField::StartedAt => left.started_at().cmp(&right.started_at()),
            TimeLogSortField::EndedAt => left.ended_at().cmp(&right.ended_at()),
            TimeLogSortField::Duration => left.duration_seconds().cmp(&right.duration_seconds()),
            TimeLogSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        };
        self.order
            .apply(primary.then_with(|| left.id().cmp(&right.id())))
    }
}
