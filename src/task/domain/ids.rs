//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive integer identifier of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] when the value is not
    /// positive.
    pub const fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value <= 0 {
            return Err(TaskDomainError::InvalidTaskId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion percentage in `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Progress of a task that has not started.
    pub const ZERO: Self = Self(0);

    /// Creates a validated progress value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidProgress`] when the value lies
    /// outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        if !super::rules::is_valid_progress(value) {
            return Err(TaskDomainError::InvalidProgress(value));
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidProgress(value))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Positive estimate of the work a task needs, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimatedMinutes(u32);

impl EstimatedMinutes {
    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEstimate`] when the value is not a
    /// positive number that fits in 32 bits.
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        u32::try_from(value)
            .ok()
            .filter(|minutes| *minutes > 0)
            .map(Self)
            .ok_or(TaskDomainError::InvalidEstimate(value))
    }

    /// Returns the estimate in minutes.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}
