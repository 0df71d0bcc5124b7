//! Application services for task lifecycle orchestration.

mod bulk;
mod lifecycle;

pub use bulk::{BulkFailure, BulkOperationReport, BulkTaskService};
pub use lifecycle::{
    CreateTaskRequest, TaskDetails, TaskService, TaskServiceError, TaskServiceResult,
    UpdateTaskRequest,
};
