//! Optimistic concurrency and bulk operations on shared task storage.

use super::helpers::{Workspace, workspace};
use eyre::{bail, ensure};
use quadrant::error::{Classify, ErrorKind};
use quadrant::task::domain::{Priority, TaskId, TaskStatus};
use quadrant::task::ports::{TaskRepository, TaskRepositoryError};
use quadrant::task::services::{BulkTaskService, CreateTaskRequest, TaskServiceError, UpdateTaskRequest};
use quadrant::user::domain::UserId;
use rstest::rstest;

async fn seed(workspace: &Workspace, titles: &[&str]) -> eyre::Result<Vec<TaskId>> {
    let mut ids = Vec::with_capacity(titles.len());
    for title in titles {
        let task = workspace
            .tasks
            .create_task(CreateTaskRequest::new(*title, UserId::new(1)?))
            .await?;
        ids.push(task.id());
    }
    Ok(ids)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_write_is_rejected_with_conflict(workspace: Workspace) -> eyre::Result<()> {
    let ids = seed(&workspace, &["Contended"]).await?;
    let Some(id) = ids.first().copied() else {
        bail!("expected a seeded task");
    };
    let Some(stale) = workspace.task_repository.find_by_id(id).await? else {
        bail!("expected the task to be stored");
    };

    workspace
        .tasks
        .update_task(id, UpdateTaskRequest::new().with_priority(Priority::High))
        .await?;
    let Err(err) = workspace.task_repository.update(&stale).await else {
        bail!("expected the stale revision to lose");
    };

    ensure!(matches!(
        err,
        TaskRepositoryError::RevisionConflict { expected, actual, .. } if actual == expected + 1
    ));
    ensure!(TaskServiceError::from(err).kind() == ErrorKind::Conflict);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_updates_each_bump_revision(workspace: Workspace) -> eyre::Result<()> {
    let ids = seed(&workspace, &["Busy"]).await?;
    let Some(id) = ids.first().copied() else {
        bail!("expected a seeded task");
    };

    let mut handles = Vec::new();
    for progress in [10, 20, 30, 40] {
        let tasks = workspace.tasks.clone();
        handles.push(tokio::spawn(async move {
            tasks
                .update_task(id, UpdateTaskRequest::new().with_progress(progress))
                .await
        }));
    }
    let mut applied = 0_u64;
    for handle in handles {
        match handle.await? {
            Ok(_) => applied += 1,
            Err(err) => ensure!(err.kind() == ErrorKind::Conflict, "unexpected error: {err}"),
        }
    }

    let stored = workspace.tasks.get_task(id).await?.task;
    ensure!(applied >= 1);
    ensure!(stored.revision() == applied);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_operations_report_each_task(workspace: Workspace) -> eyre::Result<()> {
    let ids = seed(&workspace, &["Alpha", "Beta", "Gamma"]).await?;
    let [alpha, beta, gamma] = ids.as_slice() else {
        bail!("expected three seeded tasks");
    };
    workspace
        .tasks
        .update_task(*beta, UpdateTaskRequest::new().with_status(TaskStatus::Done))
        .await?;
    let bulk = BulkTaskService::new(workspace.tasks.clone());

    let reprioritised = bulk
        .update_tasks(
            &[*alpha, *beta, *gamma],
            &UpdateTaskRequest::new().with_priority(Priority::Low),
        )
        .await;
    ensure!(reprioritised.succeeded == vec![*alpha, *gamma]);
    let Some(frozen) = reprioritised.failures.first() else {
        bail!("expected the completed task to fail");
    };
    ensure!(frozen.id == *beta);
    ensure!(frozen.error.kind() == ErrorKind::Validation);

    let removed = bulk.delete_tasks(&[*alpha, *gamma, *alpha]).await;
    ensure!(removed.succeeded == vec![*alpha, *gamma]);
    ensure!(removed.failed_count() == 1);
    ensure!(workspace.tasks.get_task(*beta).await?.task.priority() != Priority::Low);
    Ok(())
}
