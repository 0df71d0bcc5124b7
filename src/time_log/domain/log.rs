//! Time log entity, its draft, and partial changes.

use super::{TimeLogDomainError, TimeLogId, rules::calculate_duration};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text note on a time log, at most 500 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeLogDescription(String);

impl TimeLogDescription {
    /// Maximum permitted length in characters.
    pub const MAX_LENGTH: usize = 500;

    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogDomainError::DescriptionTooLong`] when the text
    /// exceeds [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TimeLogDomainError> {
        let text = value.into();
        if text.chars().count() > Self::MAX_LENGTH {
            return Err(TimeLogDomainError::DescriptionTooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(text))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeLogDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated data for a time log that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLogDraft {
    task_id: TaskId,
    user_id: UserId,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    duration_seconds: Option<u64>,
    description: Option<TimeLogDescription>,
    created_at: DateTime<Utc>,
}

impl TimeLogDraft {
    /// Creates a running log that starts now.
    #[must_use]
    pub fn started(task_id: TaskId, user_id: UserId, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            task_id,
            user_id,
            started_at: now,
            ended_at: None,
            duration_seconds: None,
            description: None,
            created_at: now,
        }
    }

    /// Creates a closed log covering `started_at..ended_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogDomainError::EndNotAfterStart`] when the interval is
    /// empty or reversed.
    pub fn closed(
        task_id: TaskId,
        user_id: UserId,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<Self, TimeLogDomainError> {
        let duration = calculate_duration(started_at, ended_at)?;
        Ok(Self {
            task_id,
            user_id,
            started_at,
            ended_at: Some(ended_at),
            duration_seconds: Some(duration),
            description: None,
            created_at: clock.utc(),
        })
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: TimeLogDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Returns the task being tracked.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the user tracking time.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Partial update to a time log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeLogChanges {
    /// New end time.
    pub ended_at: Option<DateTime<Utc>>,
    /// New description; `Some(None)` removes it.
    pub description: Option<Option<TimeLogDescription>>,
}

/// Time one user spent on one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLog {
    id: TimeLogId,
    task_id: TaskId,
    user_id: UserId,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    duration_seconds: Option<u64>,
    description: Option<TimeLogDescription>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted time log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTimeLogData {
    /// Persisted identifier.
    pub id: TimeLogId,
    /// Persisted task.
    pub task_id: TaskId,
    /// Persisted user.
    pub user_id: UserId,
    /// Persisted start.
    pub started_at: DateTime<Utc>,
    /// Persisted end, if stopped.
    pub ended_at: Option<DateTime<Utc>>,
    /// Persisted duration in seconds, if stopped.
    pub duration_seconds: Option<u64>,
    /// Persisted description.
    pub description: Option<TimeLogDescription>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TimeLog {
    /// Materialises a draft under the identifier assigned by storage.
    #[must_use]
    pub fn from_draft(id: TimeLogId, draft: TimeLogDraft) -> Self {
        Self {
            id,
            task_id: draft.task_id,
            user_id: draft.user_id,
            started_at: draft.started_at,
            ended_at: draft.ended_at,
            duration_seconds: draft.duration_seconds,
            description: draft.description,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        }
    }

    /// Reconstructs a time log from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTimeLogData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            started_at: data.started_at,
            ended_at: data.ended_at,
            duration_seconds: data.duration_seconds,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> TimeLogId {
        self.id
    }

    /// Returns the tracked task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the user who tracked the time.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the start time.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the end time, or `None` while running.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Returns the duration in whole seconds, or `None` while running.
    #[must_use]
    pub const fn duration_seconds(&self) -> Option<u64> {
        self.duration_seconds
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TimeLogDescription> {
        self.description.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Stops a running log at `ended_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogDomainError::AlreadyEnded`] for a stopped log, or
    /// [`TimeLogDomainError::EndNotAfterStart`] when `ended_at` is not after
    /// the start.
    pub fn end(
        &mut self,
        ended_at: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<(), TimeLogDomainError> {
        if self.ended_at.is_some() {
            return Err(TimeLogDomainError::AlreadyEnded(self.id));
        }
        self.duration_seconds = Some(calculate_duration(self.started_at, ended_at)?);
        self.ended_at = Some(ended_at);
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Applies a partial update, recomputing the duration when the end moves.
    ///
    /// Nothing changes if validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogDomainError::EndNotAfterStart`] when the new end is
    /// not after the start.
    pub fn apply_changes(
        &mut self,
        changes: TimeLogChanges,
        clock: &impl Clock,
    ) -> Result<(), TimeLogDomainError> {
        let duration = changes
            .ended_at
            .map(|end| calculate_duration(self.started_at, end))
            .transpose()?;
        if let Some(end) = changes.ended_at {
            self.ended_at = Some(end);
            self.duration_seconds = duration;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}
