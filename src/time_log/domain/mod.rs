//! Domain model for time logs.

mod error;
mod ids;
mod log;
mod query;
pub mod rules;

pub use error::TimeLogDomainError;
pub use ids::TimeLogId;
pub use log::{PersistedTimeLogData, TimeLog, TimeLogChanges, TimeLogDescription, TimeLogDraft};
pub use query::{TimeLogQuery, TimeLogSortField};
pub use rules::{calculate_duration, format_duration};
