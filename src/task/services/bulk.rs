//! Bulk task operations with per-item outcome reporting.

use super::lifecycle::{TaskService, TaskServiceError, UpdateTaskRequest};
use crate::task::{domain::TaskId, ports::TaskRepository};
use mockable::Clock;
use tracing::{info, warn};

/// Failure of one item in a bulk operation.
#[derive(Debug)]
pub struct BulkFailure {
    /// Task the operation failed for.
    pub id: TaskId,
    /// Why it failed.
    pub error: TaskServiceError,
}

/// Outcome of a bulk operation.
///
/// Items are processed in request order; a failure never stops the batch.
#[derive(Debug, Default)]
pub struct BulkOperationReport {
    /// Tasks the operation succeeded for, in request order.
    pub succeeded: Vec<TaskId>,
    /// Tasks the operation failed for, in request order.
    pub failures: Vec<BulkFailure>,
}

impl BulkOperationReport {
    /// Returns the number of successful items.
    #[must_use]
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    /// Returns the number of failed items.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` when every item succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record<T>(&mut self, id: TaskId, outcome: Result<T, TaskServiceError>) {
        match outcome {
            Ok(_) => self.succeeded.push(id),
            Err(error) => {
                warn!(task_id = %id, error = %error, "bulk item failed");
                self.failures.push(BulkFailure { id, error });
            }
        }
    }
}

/// Applies one task operation to many tasks.
pub struct BulkTaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: TaskService<R, C>,
}

impl<R, C> BulkTaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a bulk service on top of a task service.
    #[must_use]
    pub const fn new(tasks: TaskService<R, C>) -> Self {
        Self { tasks }
    }

    /// Applies the same partial update to every task in `ids`.
    pub async fn update_tasks(
        &self,
        ids: &[TaskId],
        request: &UpdateTaskRequest,
    ) -> BulkOperationReport {
        let mut report = BulkOperationReport::default();
        for id in ids {
            let outcome = self.tasks.update_task(*id, request.clone()).await;
            report.record(*id, outcome);
        }
        info!(
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "bulk update finished"
        );
        report
    }

    /// Soft-deletes every task in `ids`.
    pub async fn delete_tasks(&self, ids: &[TaskId]) -> BulkOperationReport {
        let mut report = BulkOperationReport::default();
        for id in ids {
            let outcome = self.tasks.delete_task(*id).await;
            report.record(*id, outcome);
        }
        info!(
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "bulk delete finished"
        );
        report
    }
}
