//! Pure rules for time log intervals.

use super::{TimeLog, TimeLogDomainError};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Returns the whole seconds between `start` and `end`, rounding down.
///
/// # Errors
///
/// Returns [`TimeLogDomainError::EndNotAfterStart`] when `end` is not strictly
/// after `start`.
pub fn calculate_duration(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<u64, TimeLogDomainError> {
    if end <= start {
        return Err(TimeLogDomainError::EndNotAfterStart { start, end });
    }
    u64::try_from((end - start).num_seconds())
        .map_err(|_| TimeLogDomainError::EndNotAfterStart { start, end })
}

/// Returns `true` when the log has no end time yet.
#[must_use]
pub const fn is_active(log: &TimeLog) -> bool {
    log.ended_at().is_none()
}

/// Returns `true` when `user_id` has a running log among `logs`.
#[must_use]
pub fn has_active(logs: &[TimeLog], user_id: UserId) -> bool {
    logs.iter()
        .any(|log| log.user_id() == user_id && is_active(log))
}

/// Returns `true` when `[start, end)` intersects `existing`.
///
/// A running log overlaps every interval.
#[must_use]
pub fn overlaps(existing: &TimeLog, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    existing
        .ended_at()
        .is_none_or(|existing_end| start < existing_end && end > existing.started_at())
}

/// Rejects an interval that intersects any of `existing`.
///
/// # Errors
///
/// Returns [`TimeLogDomainError::Overlap`] naming the first intersecting log.
pub fn ensure_no_overlap(
    existing: &[TimeLog],
    user_id: UserId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), TimeLogDomainError> {
    existing
        .iter()
        .find(|log| overlaps(log, start, end))
        .map_or(Ok(()), |log| {
            Err(TimeLogDomainError::Overlap {
                user_id,
                existing: log.id(),
            })
        })
}

/// Renders a duration as hours, minutes, and seconds, e.g. `1h 2m 3s`.
///
/// Zero components are omitted, and a zero duration renders as `0s`.
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds.div_euclid(SECONDS_PER_HOUR);
    let minutes = total_seconds
        .rem_euclid(SECONDS_PER_HOUR)
        .div_euclid(SECONDS_PER_MINUTE);
    let seconds = total_seconds.rem_euclid(SECONDS_PER_MINUTE);

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{seconds}s"));
    }
    parts.join(" ")
}
