//! Task aggregate root and the requests that create and change it.

use super::{
    EisenhowerQuadrant, EstimatedMinutes, Priority, Progress, ScheduleWindow, TaskDescription,
    TaskDomainError, TaskId, TaskStatus, TaskTitle, rules,
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated data for a task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    description: Option<TaskDescription>,
    status: TaskStatus,
    priority: Priority,
    importance: bool,
    urgency: bool,
    parent_id: Option<TaskId>,
    created_by: UserId,
    assigned_to: Option<UserId>,
    estimated_minutes: Option<EstimatedMinutes>,
    progress: Progress,
    schedule: ScheduleWindow,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TaskDraft {
    /// Creates a draft with default status, priority, and flags.
    #[must_use]
    pub fn new(title: TaskTitle, created_by: UserId, clock: &impl Clock) -> Self {
        Self {
            title,
            description: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            importance: false,
            urgency: false,
            parent_id: None,
            created_by,
            assigned_to: None,
            estimated_minutes: None,
            progress: Progress::ZERO,
            schedule: ScheduleWindow::default(),
            due_date: None,
            created_at: clock.utc(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the importance and urgency flags.
    #[must_use]
    pub const fn with_flags(mut self, importance: bool, urgency: bool) -> Self {
        self.importance = importance;
        self.urgency = urgency;
        self
    }

    /// Makes the task a subtask of `parent_id`.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Assigns the task to a user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Sets the estimated effort.
    #[must_use]
    pub const fn with_estimate(mut self, estimate: EstimatedMinutes) -> Self {
        self.estimated_minutes = Some(estimate);
        self
    }

    /// Sets the initial progress.
    #[must_use]
    pub const fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the scheduled window.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: ScheduleWindow) -> Self {
        self.schedule = schedule;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the requested parent task, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }
}

/// Partial update of a task.
///
/// `None` leaves a field untouched. For nullable fields the inner `Option`
/// is the new value, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement or cleared description.
    pub description: Option<Option<TaskDescription>>,
    /// Target status.
    pub status: Option<TaskStatus>,
    /// Target priority.
    pub priority: Option<Priority>,
    /// Replacement importance flag.
    pub importance: Option<bool>,
    /// Replacement urgency flag.
    pub urgency: Option<bool>,
    /// Replacement or cleared parent task.
    pub parent_id: Option<Option<TaskId>>,
    /// Replacement or cleared assignee.
    pub assigned_to: Option<Option<UserId>>,
    /// Replacement or cleared estimate.
    pub estimated_minutes: Option<Option<EstimatedMinutes>>,
    /// Replacement progress.
    pub progress: Option<Progress>,
    /// Replacement or cleared scheduled start.
    pub scheduled_start: Option<Option<DateTime<Utc>>>,
    /// Replacement or cleared scheduled end.
    pub scheduled_end: Option<Option<DateTime<Utc>>>,
    /// Replacement or cleared due date.
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskChanges {
    /// Returns `true` when the request changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    status: TaskStatus,
    priority: Priority,
    importance: bool,
    urgency: bool,
    parent_id: Option<TaskId>,
    created_by: UserId,
    assigned_to: Option<UserId>,
    estimated_minutes: Option<EstimatedMinutes>,
    progress: Progress,
    schedule: ScheduleWindow,
    due_date: Option<DateTime<Utc>>,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted importance flag.
    pub importance: bool,
    /// Persisted urgency flag.
    pub urgency: bool,
    /// Persisted parent task, if any.
    pub parent_id: Option<TaskId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted assignee, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted estimate, if any.
    pub estimated_minutes: Option<EstimatedMinutes>,
    /// Persisted progress.
    pub progress: Progress,
    /// Persisted scheduled window.
    pub schedule: ScheduleWindow,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted revision counter.
    pub revision: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Materialises a draft under the identifier assigned by storage.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            importance: draft.importance,
            urgency: draft.urgency,
            parent_id: draft.parent_id,
            created_by: draft.created_by,
            assigned_to: draft.assigned_to,
            estimated_minutes: draft.estimated_minutes,
            progress: draft.progress,
            schedule: draft.schedule,
            due_date: draft.due_date,
            revision: 0,
            created_at: draft.created_at,
            updated_at: draft.created_at,
            deleted_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            importance: data.importance,
            urgency: data.urgency,
            parent_id: data.parent_id,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            estimated_minutes: data.estimated_minutes,
            progress: data.progress,
            schedule: data.schedule,
            due_date: data.due_date,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the importance flag.
    #[must_use]
    pub const fn importance(&self) -> bool {
        self.importance
    }

    /// Returns the urgency flag.
    #[must_use]
    pub const fn urgency(&self) -> bool {
        self.urgency
    }

    /// Returns the Eisenhower quadrant derived from importance and urgency.
    #[must_use]
    pub const fn quadrant(&self) -> EisenhowerQuadrant {
        rules::calculate_eisenhower_quadrant(self.importance, self.urgency)
    }

    /// Returns the parent task, if this is a subtask.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the estimated effort, if any.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<EstimatedMinutes> {
        self.estimated_minutes
    }

    /// Returns the progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the scheduled window.
    #[must_use]
    pub const fn schedule(&self) -> ScheduleWindow {
        self.schedule
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the revision counter used for optimistic concurrency.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
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

    /// Returns the soft-delete marker.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the task is soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns `true` when the task has a due date earlier than `now`.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        rules::is_overdue(self.due_date, now)
    }

    /// Applies a partial update.
    ///
    /// Every guard runs before any field changes, so a rejected update leaves
    /// the task untouched. Status and priority guards are evaluated against
    /// the current status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StatusFrozen`] when a completed task would
    /// leave `DONE`, [`TaskDomainError::PriorityFrozen`] when a completed
    /// task's priority is changed, [`TaskDomainError::SelfParent`] when the
    /// task would become its own parent, and
    /// [`TaskDomainError::InvalidDateRange`] when the merged schedule window
    /// is inverted.
    pub fn apply_changes(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let TaskChanges {
            title,
            description,
            status,
            priority,
            importance,
            urgency,
            parent_id,
            assigned_to,
            estimated_minutes,
            progress,
            scheduled_start,
            scheduled_end,
            due_date,
        } = changes;

        if let Some(next) = status {
            rules::ensure_status_change(self.id, self.status, next)?;
        }
        if priority.is_some() {
            rules::ensure_priority_change(self.id, self.status)?;
        }
        if parent_id == Some(Some(self.id)) {
            return Err(TaskDomainError::SelfParent(self.id));
        }
        let schedule = self.schedule.merged(scheduled_start, scheduled_end)?;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = importance {
            self.importance = value;
        }
        if let Some(value) = urgency {
            self.urgency = value;
        }
        if let Some(value) = parent_id {
            self.parent_id = value;
        }
        if let Some(value) = assigned_to {
            self.assigned_to = value;
        }
        if let Some(value) = estimated_minutes {
            self.estimated_minutes = value;
        }
        if let Some(value) = progress {
            self.progress = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        self.schedule = schedule;
        self.touch(clock.utc());
        Ok(())
    }

    /// Marks the task as soft-deleted at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyDeleted`] when the task is already
    /// deleted.
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) -> Result<(), TaskDomainError> {
        if self.is_deleted() {
            return Err(TaskDomainError::AlreadyDeleted(self.id));
        }
        self.deleted_at = Some(at);
        self.touch(at);
        Ok(())
    }

    /// Clears the soft-delete marker.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotDeleted`] when the task is active.
    pub fn restore(&mut self, at: DateTime<Utc>) -> Result<(), TaskDomainError> {
        if !self.is_deleted() {
            return Err(TaskDomainError::NotDeleted(self.id));
        }
        self.deleted_at = None;
        self.touch(at);
        Ok(())
    }

    /// Detaches the task from a parent that no longer exists.
    pub(crate) fn detach_parent(&mut self, at: DateTime<Utc>) {
        self.parent_id = None;
        self.touch(at);
    }

    /// Advances the revision after a successful write.
    pub(crate) const fn bump_revision(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
