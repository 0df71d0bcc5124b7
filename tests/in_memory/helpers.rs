//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use quadrant::attachment::{adapters::memory::InMemoryAttachmentRepository, services::AttachmentService};
use quadrant::comment::{adapters::memory::InMemoryCommentRepository, services::CommentService};
use quadrant::config::ServiceConfig;
use quadrant::task::{
    adapters::memory::InMemoryTaskRepository, ports::TaskDependents, services::TaskService,
};
use quadrant::time_log::{adapters::memory::InMemoryTimeLogRepository, services::TimeLogService};
use quadrant::user::{adapters::memory::InMemoryUserRepository, services::UserService};
use rstest::fixture;

/// Every service wired over shared in-memory repositories.
pub struct Workspace {
    pub tasks: TaskService<InMemoryTaskRepository, DefaultClock>,
    pub task_repository: Arc<InMemoryTaskRepository>,
    pub users: UserService<InMemoryUserRepository, DefaultClock>,
    pub comments: CommentService<InMemoryCommentRepository, InMemoryTaskRepository, DefaultClock>,
    pub attachments:
        AttachmentService<InMemoryAttachmentRepository, InMemoryTaskRepository, DefaultClock>,
    pub time_logs: TimeLogService<InMemoryTimeLogRepository, InMemoryTaskRepository, DefaultClock>,
}

impl Workspace {
    /// Wires every service with `config`; purging a task also removes its
    /// comments, time logs, and attachments.
    #[must_use]
    pub fn with_config(config: ServiceConfig) -> Self {
        let task_repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        let comments = CommentService::new(
            Arc::new(InMemoryCommentRepository::new()),
            Arc::clone(&task_repository),
            Arc::clone(&clock),
            config.comments,
        );
        let attachments = AttachmentService::new(
            Arc::new(InMemoryAttachmentRepository::new()),
            Arc::clone(&task_repository),
            Arc::clone(&clock),
            config.attachments,
        );
        let time_logs = TimeLogService::new(
            Arc::new(InMemoryTimeLogRepository::new()),
            Arc::clone(&task_repository),
            Arc::clone(&clock),
        );
        let dependents: [Arc<dyn TaskDependents>; 3] = [
            Arc::new(comments.clone()),
            Arc::new(time_logs.clone()),
            Arc::new(attachments.clone()),
        ];
        Self {
            tasks: TaskService::new(Arc::clone(&task_repository), Arc::clone(&clock))
                .with_dependents(dependents),
            users: UserService::new(Arc::new(InMemoryUserRepository::new()), clock),
            comments,
            attachments,
            time_logs,
            task_repository,
        }
    }
}

/// Fixture wiring every service with default limits.
#[fixture]
pub fn workspace() -> Workspace {
    Workspace::with_config(ServiceConfig::default())
}
