//! Application services for time tracking.

mod tracking;

pub use tracking::{
    RecordTimeLogRequest, TimeLogService, TimeLogServiceError, TimeLogServiceResult,
    UpdateTimeLogRequest,
};
