//! Service layer for starting, stopping, and recording time logs.

use crate::error::{Classify, ErrorKind};
use crate::paging::Page;
use crate::task::{
    domain::TaskId,
    ports::{TaskDependents, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::time_log::{
    domain::{
        TimeLog, TimeLogChanges, TimeLogDescription, TimeLogDomainError, TimeLogDraft, TimeLogId,
        TimeLogQuery, rules,
    },
    ports::{TimeLogRepository, TimeLogRepositoryError},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for recording a finished interval after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTimeLogRequest {
    task_id: TaskId,
    user_id: UserId,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    description: Option<String>,
}

impl RecordTimeLogRequest {
    /// Creates a request for the interval `started_at..ended_at`.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        user_id: UserId,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            user_id,
            started_at,
            ended_at,
            description: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for stopping or amending a time log.
///
/// Fields that are never set keep their stored value. When stopping a log
/// without an explicit end, the current time is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTimeLogRequest {
    ended_at: Option<DateTime<Utc>>,
    description: Option<Option<String>>,
}

impl UpdateTimeLogRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the end time.
    #[must_use]
    pub const fn ending_at(mut self, ended_at: DateTime<Utc>) -> Self {
        self.ended_at = Some(ended_at);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    fn into_changes(self) -> Result<TimeLogChanges, TimeLogDomainError> {
        Ok(TimeLogChanges {
            ended_at: self.ended_at,
            description: self
                .description
                .map(|value| value.map(TimeLogDescription::new).transpose())
                .transpose()?,
        })
    }
}

/// Service-level errors for time log operations.
#[derive(Debug, Error)]
pub enum TimeLogServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TimeLogDomainError),
    /// Time log repository operation failed.
    #[error(transparent)]
    Repository(#[from] TimeLogRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// The time log does not exist.
    #[error("time log with id {0} not found")]
    NotFound(TimeLogId),
    /// The task does not exist.
    #[error("task with id {0} not found")]
    TaskNotFound(TaskId),
    /// The task is soft-deleted, so no new time can be tracked on it.
    #[error("cannot track time on deleted task {0}")]
    TaskDeleted(TaskId),
}

impl Classify for TimeLogServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(
                TimeLogDomainError::ActiveLogExists(_) | TimeLogDomainError::Overlap { .. },
            )
            | Self::Task(TaskRepositoryError::RevisionConflict { .. }) => ErrorKind::Conflict,
            Self::Domain(_) | Self::TaskDeleted(_) => ErrorKind::Validation,
            Self::NotFound(_)
            | Self::TaskNotFound(_)
            | Self::Repository(TimeLogRepositoryError::NotFound(_))
            | Self::Task(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(TimeLogRepositoryError::Persistence(_))
            | Self::Task(TaskRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for time log service operations.
pub type TimeLogServiceResult<T> = Result<T, TimeLogServiceError>;

/// Time tracking orchestration service.
pub struct TimeLogService<R, T, C>
where
    R: TimeLogRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    logs: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<R, T, C> Clone for TimeLogService<R, T, C>
where
    R: TimeLogRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            logs: Arc::clone(&self.logs),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, T, C> TimeLogService<R, T, C>
where
    R: TimeLogRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new time log service.
    #[must_use]
    pub const fn new(logs: Arc<R>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self { logs, tasks, clock }
    }

    /// Starts a running log for `user_id` on an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::TaskNotFound`] or
    /// [`TimeLogServiceError::TaskDeleted`] for an unusable task, or
    /// [`TimeLogServiceError::Domain`] when the description is too long or
    /// the user already has a running log.
    pub async fn start_time_log(
        &self,
        task_id: TaskId,
        user_id: UserId,
        description: Option<String>,
    ) -> TimeLogServiceResult<TimeLog> {
        debug!(task_id = %task_id, user_id = %user_id, "starting time log");
        let note = description.map(TimeLogDescription::new).transpose()?;
        self.require_trackable_task(task_id).await?;

        let active = self.logs.find_active_by_user(user_id).await?;
        if rules::has_active(&active, user_id) {
            warn!(user_id = %user_id, "user already has a running time log");
            return Err(TimeLogDomainError::ActiveLogExists(user_id).into());
        }

        let mut draft = TimeLogDraft::started(task_id, user_id, &*self.clock);
        if let Some(text) = note {
            draft = draft.with_description(text);
        }
        let log = self.logs.create(draft).await?;
        info!(time_log_id = %log.id(), task_id = %task_id, user_id = %user_id, "time log started");
        Ok(log)
    }

    /// Stops a running log, at the requested end or now.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::NotFound`] when the log is missing, or
    /// [`TimeLogServiceError::Domain`] when it is already stopped or the end
    /// is not after the start.
    pub async fn end_time_log(
        &self,
        id: TimeLogId,
        request: UpdateTimeLogRequest,
    ) -> TimeLogServiceResult<TimeLog> {
        debug!(time_log_id = %id, "ending time log");
        let ended_at = request.ended_at.unwrap_or_else(|| self.clock.utc());
        let changes = request.into_changes()?;
        let mut log = self.find(id).await?;

        log.end(ended_at, &*self.clock)
            .and_then(|()| {
                log.apply_changes(
                    TimeLogChanges {
                        ended_at: None,
                        ..changes
                    },
                    &*self.clock,
                )
            })
            .inspect_err(|err| warn!(time_log_id = %id, error = %err, "time log end rejected"))?;
        self.logs.update(&log).await?;
        info!(
            time_log_id = %id,
            duration_seconds = log.duration_seconds().unwrap_or_default(),
            "time log ended"
        );
        Ok(log)
    }

    /// Records a finished interval that must not overlap the user's other
    /// logs.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::TaskNotFound`] or
    /// [`TimeLogServiceError::TaskDeleted`] for an unusable task, or
    /// [`TimeLogServiceError::Domain`] for an empty interval, a long
    /// description, or an overlap.
    pub async fn record_time_log(
        &self,
        request: RecordTimeLogRequest,
    ) -> TimeLogServiceResult<TimeLog> {
        let RecordTimeLogRequest {
            task_id,
            user_id,
            started_at,
            ended_at,
            description,
        } = request;
        debug!(task_id = %task_id, user_id = %user_id, "recording time log");
        let mut draft = TimeLogDraft::closed(task_id, user_id, started_at, ended_at, &*self.clock)?;
        if let Some(text) = description {
            draft = draft.with_description(TimeLogDescription::new(text)?);
        }
        self.require_trackable_task(task_id).await?;

        let existing = self.logs.find_by_user(user_id).await?;
        rules::ensure_no_overlap(&existing, user_id, started_at, ended_at).inspect_err(|err| {
            warn!(user_id = %user_id, error = %err, "time log overlaps");
        })?;

        let log = self.logs.create(draft).await?;
        info!(time_log_id = %log.id(), task_id = %task_id, "time log recorded");
        Ok(log)
    }

    /// Amends the end time or description of a log.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::NotFound`] when the log is missing, or
    /// [`TimeLogServiceError::Domain`] when the result is invalid.
    pub async fn update_time_log(
        &self,
        id: TimeLogId,
        request: UpdateTimeLogRequest,
    ) -> TimeLogServiceResult<TimeLog> {
        debug!(time_log_id = %id, "updating time log");
        let changes = request.into_changes()?;
        let mut log = self.find(id).await?;
        log.apply_changes(changes, &*self.clock).inspect_err(|err| {
            warn!(time_log_id = %id, error = %err, "time log update rejected");
        })?;
        self.logs.update(&log).await?;
        info!(time_log_id = %id, "time log updated");
        Ok(log)
    }

    /// Retrieves a log.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::NotFound`] when the log is missing.
    pub async fn get_time_log(&self, id: TimeLogId) -> TimeLogServiceResult<TimeLog> {
        self.find(id).await
    }

    /// Lists logs matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::Repository`] when lookup fails.
    pub async fn list_time_logs(&self, query: &TimeLogQuery) -> TimeLogServiceResult<Page<TimeLog>> {
        Ok(self.logs.list(query).await?)
    }

    /// Lists every log of a task, including tasks that are soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn list_task_time_logs(&self, task_id: TaskId) -> TimeLogServiceResult<Vec<TimeLog>> {
        if self
            .tasks
            .find_by_id_including_deleted(task_id)
            .await?
            .is_none()
        {
            return Err(TimeLogServiceError::TaskNotFound(task_id));
        }
        Ok(self.logs.find_by_task(task_id).await?)
    }

    /// Lists the running logs of a user.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::Repository`] when lookup fails.
    pub async fn active_time_logs(&self, user_id: UserId) -> TimeLogServiceResult<Vec<TimeLog>> {
        Ok(self.logs.find_active_by_user(user_id).await?)
    }

    /// Deletes a log permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TimeLogServiceError::NotFound`] when the log is missing.
    pub async fn delete_time_log(&self, id: TimeLogId) -> TimeLogServiceResult<()> {
        self.find(id).await?;
        self.logs.delete(id).await?;
        info!(time_log_id = %id, "time log deleted");
        Ok(())
    }

    async fn find(&self, id: TimeLogId) -> TimeLogServiceResult<TimeLog> {
        self.logs
            .find_by_id(id)
            .await?
            .ok_or(TimeLogServiceError::NotFound(id))
    }

    async fn require_trackable_task(&self, task_id: TaskId) -> TimeLogServiceResult<()> {
        let task = self
            .tasks
            .find_by_id_including_deleted(task_id)
            .await?
            .ok_or(TimeLogServiceError::TaskNotFound(task_id))?;
        if task.is_deleted() {
            warn!(task_id = %task_id, "cannot track time on deleted task");
            return Err(TimeLogServiceError::TaskDeleted(task_id));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, T, C> TaskDependents for TimeLogService<R, T, C>
where
    R: TimeLogRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn label(&self) -> &'static str {
        "time logs"
    }

    async fn purge_task(&self, task_id: TaskId) -> TaskRepositoryResult<usize> {
        self.logs
            .delete_by_task(task_id)
            .await
            .map_err(TaskRepositoryError::persistence)
    }
}
