//! Service layer for task creation, updates, and the soft-delete lifecycle.

use crate::error::{Classify, ErrorKind};
use crate::paging::Page;
use crate::task::{
    domain::{
        DeletedFilter, EstimatedMinutes, Priority, Progress, ScheduleWindow, Task, TaskChanges,
        TaskDescription, TaskDomainError, TaskDraft, TaskId, TaskQuery, TaskStatus, TaskTitle,
    },
    ports::{TaskDependents, TaskRepository, TaskRepositoryError},
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    created_by: UserId,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    importance: bool,
    urgency: bool,
    parent_id: Option<TaskId>,
    assigned_to: Option<UserId>,
    estimated_minutes: Option<i64>,
    progress: Option<i64>,
    scheduled_start: Option<DateTime<Utc>>,
    scheduled_end: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, created_by: UserId) -> Self {
        Self {
            title: title.into(),
            created_by,
            description: None,
            status: None,
            priority: None,
            importance: false,
            urgency: false,
            parent_id: None,
            assigned_to: None,
            estimated_minutes: None,
            progress: None,
            scheduled_start: None,
            scheduled_end: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the importance and urgency flags.
    #[must_use]
    pub const fn with_flags(mut self, importance: bool, urgency: bool) -> Self {
        self.importance = importance;
        self.urgency = urgency;
        self
    }

    /// Makes the task a subtask.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Assigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Sets the estimated effort in minutes.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, minutes: i64) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    /// Sets the initial progress percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: i64) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the scheduled window bounds.
    #[must_use]
    pub const fn with_schedule(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.scheduled_start = start;
        self.scheduled_end = end;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_draft(self, clock: &impl Clock) -> Result<TaskDraft, TaskDomainError> {
        let mut draft = TaskDraft::new(TaskTitle::new(self.title)?, self.created_by, clock)
            .with_flags(self.importance, self.urgency)
            .with_schedule(ScheduleWindow::new(
                self.scheduled_start,
                self.scheduled_end,
            )?);
        if let Some(text) = self.description {
            draft = draft.with_description(TaskDescription::new(text)?);
        }
        if let Some(status) = self.status {
            draft = draft.with_status(status);
        }
        if let Some(priority) = self.priority {
            draft = draft.with_priority(priority);
        }
        if let Some(parent) = self.parent_id {
            draft = draft.with_parent(parent);
        }
        if let Some(assignee) = self.assigned_to {
            draft = draft.with_assignee(assignee);
        }
        if let Some(minutes) = self.estimated_minutes {
            draft = draft.with_estimate(EstimatedMinutes::new(minutes)?);
        }
        if let Some(percent) = self.progress {
            draft = draft.with_progress(Progress::new(percent)?);
        }
        if let Some(due) = self.due_date {
            draft = draft.with_due_date(due);
        }
        Ok(draft)
    }
}

/// Request payload for a partial task update.
///
/// Fields that are never set keep their stored value; `clear_*` methods null
/// out optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    importance: Option<bool>,
    urgency: Option<bool>,
    parent_id: Option<Option<TaskId>>,
    assigned_to: Option<Option<UserId>>,
    estimated_minutes: Option<Option<i64>>,
    progress: Option<i64>,
    scheduled_start: Option<Option<DateTime<Utc>>>,
    scheduled_end: Option<Option<DateTime<Utc>>>,
    due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
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

    /// Requests a status change.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requests a priority change.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the importance flag.
    #[must_use]
    pub const fn with_importance(mut self, importance: bool) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Sets the urgency flag.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: bool) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Moves the task under another parent.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(Some(parent_id));
        self
    }

    /// Promotes the task to a top-level task.
    #[must_use]
    pub const fn clear_parent(mut self) -> Self {
        self.parent_id = Some(None);
        self
    }

    /// Assigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assigned_to = Some(Some(assignee));
        self
    }

    /// Unassigns the task.
    #[must_use]
    pub const fn clear_assignee(mut self) -> Self {
        self.assigned_to = Some(None);
        self
    }

    /// Sets the estimated effort in minutes.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, minutes: i64) -> Self {
        self.estimated_minutes = Some(Some(minutes));
        self
    }

    /// Removes the estimate.
    #[must_use]
    pub const fn clear_estimated_minutes(mut self) -> Self {
        self.estimated_minutes = Some(None);
        self
    }

    /// Sets the progress percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: i64) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the scheduled start.
    #[must_use]
    pub const fn with_scheduled_start(mut self, start: DateTime<Utc>) -> Self {
        self.scheduled_start = Some(Some(start));
        self
    }

    /// Removes the scheduled start.
    #[must_use]
    pub const fn clear_scheduled_start(mut self) -> Self {
        self.scheduled_start = Some(None);
        self
    }

    /// Sets the scheduled end.
    #[must_use]
    pub const fn with_scheduled_end(mut self, end: DateTime<Utc>) -> Self {
        self.scheduled_end = Some(Some(end));
        self
    }

    /// Removes the scheduled end.
    #[must_use]
    pub const fn clear_scheduled_end(mut self) -> Self {
        self.scheduled_end = Some(None);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    fn into_changes(self) -> Result<TaskChanges, TaskDomainError> {
        Ok(TaskChanges {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self
                .description
                .map(|value| value.map(TaskDescription::new).transpose())
                .transpose()?,
            status: self.status,
            priority: self.priority,
            importance: self.importance,
            urgency: self.urgency,
            parent_id: self.parent_id,
            assigned_to: self.assigned_to,
            estimated_minutes: self
                .estimated_minutes
                .map(|value| value.map(EstimatedMinutes::new).transpose())
                .transpose()?,
            progress: self.progress.map(Progress::new).transpose()?,
            scheduled_start: self.scheduled_start,
            scheduled_end: self.scheduled_end,
            due_date: self.due_date,
        })
    }
}

/// A task together with a summary of its direct subtasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// The task itself.
    pub task: Task,
    /// Number of active direct subtasks.
    pub subtask_count: usize,
    /// Number of active direct subtasks in `DONE`.
    pub completed_subtask_count: usize,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task does not exist or is soft-deleted.
    #[error("task with id {0} not found")]
    NotFound(TaskId),
    /// The requested parent does not exist or is soft-deleted.
    #[error("parent task with id {0} not found")]
    ParentNotFound(TaskId),
    /// The requested parent is a descendant of the task.
    #[error("task {task_id} cannot be moved under its own subtask {parent_id}")]
    ParentCycle {
        /// Task being moved.
        task_id: TaskId,
        /// Rejected parent.
        parent_id: TaskId,
    },
}

impl Classify for TaskServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::ParentCycle { .. } => ErrorKind::Validation,
            Self::NotFound(_)
            | Self::ParentNotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(TaskRepositoryError::RevisionConflict { .. }) => ErrorKind::Conflict,
            Self::Repository(TaskRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    dependents: Vec<Arc<dyn TaskDependents>>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            dependents: self.dependents.clone(),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            dependents: Vec::new(),
        }
    }

    /// Registers stores whose records are removed when a task is purged.
    #[must_use]
    pub fn with_dependents(
        mut self,
        dependents: impl IntoIterator<Item = Arc<dyn TaskDependents>>,
    ) -> Self {
        self.dependents.extend(dependents);
        self
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for malformed fields,
    /// [`TaskServiceError::ParentNotFound`] when the parent is missing, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let draft = request.into_draft(&*self.clock)?;
        debug!(created_by = %draft.created_by(), "creating task");
        if let Some(parent_id) = draft.parent_id() {
            self.require_parent(parent_id).await?;
        }

        let task = self.repository.create(draft).await?;
        info!(
            task_id = %task.id(),
            quadrant = %task.quadrant(),
            "task created"
        );
        Ok(task)
    }

    /// Retrieves an active task with its subtask summary.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is missing or
    /// soft-deleted, or [`TaskServiceError::Repository`] when lookup fails.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<TaskDetails> {
        let task = self.find_active(id).await?;
        let children = self.repository.find_children(id).await?;
        let completed_subtask_count = children
            .iter()
            .filter(|child| child.status() == TaskStatus::Done)
            .count();
        Ok(TaskDetails {
            task,
            subtask_count: children.len(),
            completed_subtask_count,
        })
    }

    /// Lists tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when lookup fails.
    pub async fn list_tasks(&self, query: &TaskQuery) -> TaskServiceResult<Page<Task>> {
        Ok(self.repository.list(query, self.clock.utc()).await?)
    }

    /// Lists soft-deleted tasks matching the remaining filters of `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when lookup fails.
    pub async fn list_deleted_tasks(&self, query: &TaskQuery) -> TaskServiceResult<Page<Task>> {
        let deleted_only = TaskQuery {
            deleted: DeletedFilter::DeletedOnly,
            ..query.clone()
        };
        self.list_tasks(&deleted_only).await
    }

    /// Applies a partial update.
    ///
    /// The quadrant follows any importance or urgency change. A completed task
    /// keeps its status and priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is missing,
    /// [`TaskServiceError::Domain`] when a field or lifecycle rule rejects the
    /// change, [`TaskServiceError::ParentNotFound`] or
    /// [`TaskServiceError::ParentCycle`] for an invalid parent, or
    /// [`TaskServiceError::Repository`] when persistence fails, including a
    /// concurrent modification.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        debug!(task_id = %id, "updating task");
        let changes = request.into_changes()?;
        let mut task = self.find_active(id).await?;

        if let Some(Some(parent_id)) = changes.parent_id.filter(|parent| *parent != Some(id)) {
            self.require_parent(parent_id).await?;
            self.ensure_not_descendant(id, parent_id).await?;
        }

        task.apply_changes(changes, &*self.clock).inspect_err(|err| {
            warn!(task_id = %id, error = %err, "task update rejected");
        })?;
        let stored = self.repository.update(&task).await.inspect_err(|err| {
            if matches!(err, TaskRepositoryError::RevisionConflict { .. }) {
                warn!(task_id = %id, error = %err, "task update lost a race");
            }
        })?;
        info!(
            task_id = %id,
            status = %stored.status(),
            quadrant = %stored.quadrant(),
            "task updated"
        );
        Ok(stored)
    }

    /// Soft-deletes an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// [`TaskServiceError::Domain`] when it is already deleted, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        let task = self.find_any(id).await?;
        if task.is_deleted() {
            warn!(task_id = %id, "task already deleted");
            return Err(TaskDomainError::AlreadyDeleted(id).into());
        }
        let deleted = self.repository.soft_delete(id, self.clock.utc()).await?;
        info!(task_id = %id, "task soft-deleted");
        Ok(deleted)
    }

    /// Restores a soft-deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// [`TaskServiceError::Domain`] when it is not deleted, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn restore_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        let task = self.find_any(id).await?;
        if !task.is_deleted() {
            warn!(task_id = %id, "task is not deleted");
            return Err(TaskDomainError::NotDeleted(id).into());
        }
        let restored = self.repository.restore(id, self.clock.utc()).await?;
        info!(task_id = %id, "task restored");
        Ok(restored)
    }

    /// Removes a task permanently, whether or not it is soft-deleted.
    ///
    /// Records the registered dependents keep for the task are removed first.
    /// Direct subtasks become top-level tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist or
    /// [`TaskServiceError::Repository`] when a dependent store or task
    /// persistence fails. A failing dependent leaves the task in place.
    pub async fn permanently_delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.find_any(id).await?;
        for dependent in &self.dependents {
            let removed = dependent.purge_task(id).await.inspect_err(|err| {
                warn!(task_id = %id, dependent = dependent.label(), error = %err, "task purge halted");
            })?;
            debug!(task_id = %id, dependent = dependent.label(), removed, "purged dependent records");
        }
        self.repository
            .permanent_delete(id, self.clock.utc())
            .await?;
        info!(task_id = %id, "task permanently deleted");
        Ok(())
    }

    async fn find_active(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    async fn find_any(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id_including_deleted(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    async fn require_parent(&self, parent_id: TaskId) -> TaskServiceResult<()> {
        if self.repository.find_by_id(parent_id).await?.is_none() {
            warn!(parent_id = %parent_id, "parent task not found");
            return Err(TaskServiceError::ParentNotFound(parent_id));
        }
        Ok(())
    }

    /// Walks up from `parent_id` and rejects the move if `task_id` is an
    /// ancestor of it.
    async fn ensure_not_descendant(
        &self,
        task_id: TaskId,
        parent_id: TaskId,
    ) -> TaskServiceResult<()> {
        let mut visited = HashSet::new();
        let mut cursor = Some(parent_id);
        while let Some(current) = cursor {
            if current == task_id {
                warn!(task_id = %task_id, parent_id = %parent_id, "parent cycle rejected");
                return Err(TaskServiceError::ParentCycle { task_id, parent_id });
            }
            if !visited.insert(current) {
                break;
            }
            cursor = self
                .repository
                .find_by_id_including_deleted(current)
                .await?
                .and_then(|ancestor| ancestor.parent_id());
        }
        Ok(())
    }
}
