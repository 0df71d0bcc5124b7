//! Domain model for task lifecycle management.
//!
//! The rules in [`rules`] are pure functions over in-memory values; the
//! [`Task`] aggregate applies them when it is mutated so that callers cannot
//! bypass the status and priority freeze of completed tasks.

mod error;
mod ids;
mod quadrant;
mod query;
pub mod rules;
mod schedule;
mod status;
mod task;
mod text;

pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{EstimatedMinutes, Progress, TaskId};
pub use quadrant::EisenhowerQuadrant;
pub use query::{DeletedFilter, TaskQuery, TaskSortField};
pub use schedule::ScheduleWindow;
pub use status::{Priority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
pub use text::{TaskDescription, TaskTitle};
