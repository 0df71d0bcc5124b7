//! Shared world state for task lifecycle rule scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use quadrant::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskService, TaskServiceError},
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task rule behaviour tests.
pub struct TaskRulesWorld {
    pub service: TestTaskService,
    pub task: Option<Task>,
    pub last_update: Option<Result<Task, TaskServiceError>>,
}

impl TaskRulesWorld {
    /// Creates a world with no task yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
            ),
            task: None,
            last_update: None,
        }
    }

    /// Returns the task under test.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskRulesWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskRulesWorld {
    TaskRulesWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
