//! Error types for time log validation.

use super::TimeLogId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or changing time logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeLogDomainError {
    /// The time log identifier is not a positive integer.
    #[error("invalid time log id {0}, expected a positive integer")]
    InvalidTimeLogId(i64),

    /// The description exceeds the character limit.
    #[error("time log description exceeds {max} character limit")]
    DescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The interval ends at or before its start.
    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart {
        /// Interval start.
        start: DateTime<Utc>,
        /// Rejected interval end.
        end: DateTime<Utc>,
    },

    /// The log has already been stopped.
    #[error("time log {0} is already ended")]
    AlreadyEnded(TimeLogId),

    /// The user already has a running log.
    #[error("user {0} already has an active time log")]
    ActiveLogExists(UserId),

    /// The interval overlaps another log of the same user.
    #[error("interval overlaps existing time log {existing} of user {user_id}")]
    Overlap {
        /// User recording the interval.
        user_id: UserId,
        /// First log found to overlap.
        existing: TimeLogId,
    },
}

impl TimeLogDomainError {
    /// Returns the request field the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTimeLogId(_) => Some("id"),
            Self::DescriptionTooLong { .. } => Some("description"),
            Self::EndNotAfterStart { .. } => Some("endedAt"),
            Self::Overlap { .. } => Some("startedAt"),
            Self::AlreadyEnded(_) | Self::ActiveLogExists(_) => None,
        }
    }
}
