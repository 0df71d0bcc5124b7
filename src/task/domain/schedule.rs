//! Planned execution window of a task.

use super::{TaskDomainError, rules};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional scheduled start and end; when both are set, start is not after end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl ScheduleWindow {
    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] when both bounds are set
    /// and the window ends before it starts.
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, TaskDomainError> {
        rules::ensure_date_range(start, end)?;
        Ok(Self { start, end })
    }

    /// Returns the scheduled start.
    #[must_use]
    pub const fn start(self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Returns the scheduled end.
    #[must_use]
    pub const fn end(self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Returns the window with either bound replaced.
    ///
    /// The outer `Option` selects whether a bound changes; the inner one is
    /// the new value, with `None` clearing it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] when the merged window is
    /// inverted.
    pub fn merged(
        self,
        start: Option<Option<DateTime<Utc>>>,
        end: Option<Option<DateTime<Utc>>>,
    ) -> Result<Self, TaskDomainError> {
        Self::new(start.unwrap_or(self.start), end.unwrap_or(self.end))
    }
}
