//! Identifier type for time logs.

use super::TimeLogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive integer identifier of a time log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeLogId(i64);

impl TimeLogId {
    /// Creates a validated time log identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogDomainError::InvalidTimeLogId`] when the value is not
    /// positive.
    pub const fn new(value: i64) -> Result<Self, TimeLogDomainError> {
        if value <= 0 {
            return Err(TimeLogDomainError::InvalidTimeLogId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TimeLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
