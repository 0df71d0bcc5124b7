//! End-to-end task workflows over the in-memory adapters.

use super::helpers::{Workspace, workspace};
use chrono::{Duration, Utc};
use eyre::{bail, ensure};
use quadrant::attachment::domain::AttachmentQuery;
use quadrant::attachment::services::CreateAttachmentRequest;
use quadrant::comment::domain::CommentQuery;
use quadrant::comment::services::CreateCommentRequest;
use quadrant::error::{Classify, ErrorKind};
use quadrant::task::domain::{EisenhowerQuadrant, TaskQuery, TaskStatus};
use quadrant::task::services::{CreateTaskRequest, TaskServiceError, UpdateTaskRequest};
use quadrant::time_log::domain::TimeLogQuery;
use quadrant::time_log::services::RecordTimeLogRequest;
use quadrant::user::services::CreateUserRequest;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_plans_task_with_subtasks(workspace: Workspace) -> eyre::Result<()> {
    let owner = workspace
        .users
        .create_user(CreateUserRequest::new("ada", "Ada Lovelace", "ada@example.com"))
        .await?;

    let launch = workspace
        .tasks
        .create_task(CreateTaskRequest::new("Launch beta", owner.id()).with_flags(true, false))
        .await?;
    ensure!(launch.quadrant() == EisenhowerQuadrant::Schedule);

    for title in ["Write notes", "Cut release"] {
        workspace
            .tasks
            .create_task(CreateTaskRequest::new(title, owner.id()).with_parent(launch.id()))
            .await?;
    }
    let subtasks = workspace
        .tasks
        .list_tasks(&TaskQuery {
            parent_id: Some(launch.id()),
            ..TaskQuery::default()
        })
        .await?;
    let Some(first) = subtasks.items.first() else {
        bail!("expected the subtasks to be listed");
    };
    workspace
        .tasks
        .update_task(first.id(), UpdateTaskRequest::new().with_status(TaskStatus::Done))
        .await?;

    let details = workspace.tasks.get_task(launch.id()).await?;
    ensure!(subtasks.total == 2);
    ensure!(details.subtask_count == 2);
    ensure!(details.completed_subtask_count == 1);

    let escalated = workspace
        .tasks
        .update_task(launch.id(), UpdateTaskRequest::new().with_urgency(true))
        .await?;
    ensure!(escalated.quadrant() == EisenhowerQuadrant::DoFirst);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_deleted_task_moves_to_trash_and_back(workspace: Workspace) -> eyre::Result<()> {
    let owner = workspace
        .users
        .create_user(CreateUserRequest::new("grace", "Grace Hopper", "grace@example.com"))
        .await?;
    let task = workspace
        .tasks
        .create_task(CreateTaskRequest::new("Archive logs", owner.id()))
        .await?;

    workspace.tasks.delete_task(task.id()).await?;
    let Err(hidden) = workspace.tasks.get_task(task.id()).await else {
        bail!("expected a soft-deleted task to be hidden");
    };
    ensure!(matches!(hidden, TaskServiceError::NotFound(_)));
    ensure!(hidden.kind() == ErrorKind::NotFound);
    let trash = workspace
        .tasks
        .list_deleted_tasks(&TaskQuery::default())
        .await?;
    ensure!(trash.items.iter().any(|deleted| deleted.id() == task.id()));

    let restored = workspace.tasks.restore_task(task.id()).await?;
    ensure!(!restored.is_deleted());
    ensure!(workspace.tasks.get_task(task.id()).await?.task.id() == task.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn purging_a_parent_promotes_its_subtasks(workspace: Workspace) -> eyre::Result<()> {
    let owner = workspace
        .users
        .create_user(CreateUserRequest::new("linus", "Linus", "linus@example.com"))
        .await?;
    let parent = workspace
        .tasks
        .create_task(CreateTaskRequest::new("Epic", owner.id()))
        .await?;
    let child = workspace
        .tasks
        .create_task(CreateTaskRequest::new("Story", owner.id()).with_parent(parent.id()))
        .await?;

    workspace.tasks.permanently_delete_task(parent.id()).await?;

    let survivor = workspace.tasks.get_task(child.id()).await?;
    ensure!(survivor.task.parent_id().is_none());
    ensure!(matches!(
        workspace.tasks.restore_task(parent.id()).await,
        Err(TaskServiceError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn purging_a_task_removes_its_records(workspace: Workspace) -> eyre::Result<()> {
    let owner = workspace
        .users
        .create_user(CreateUserRequest::new("margaret", "Margaret", "margaret@example.com"))
        .await?;
    let task = workspace
        .tasks
        .create_task(CreateTaskRequest::new("Short-lived", owner.id()))
        .await?;
    let note = workspace
        .comments
        .create_comment(CreateCommentRequest::new(task.id(), owner.id(), "first note"))
        .await?;
    let hidden = workspace
        .comments
        .create_comment(CreateCommentRequest::new(task.id(), owner.id(), "hidden note"))
        .await?;
    workspace
        .comments
        .delete_comment(hidden.id(), owner.id())
        .await?;
    let start = Utc::now() - Duration::hours(3);
    workspace
        .time_logs
        .record_time_log(RecordTimeLogRequest::new(
            task.id(),
            owner.id(),
            start,
            start + Duration::hours(1),
        ))
        .await?;
    workspace
        .attachments
        .create_attachment(CreateAttachmentRequest::new(
            task.id(),
            owner.id(),
            "plan.txt",
            12,
            "text/plain",
            "uploads/plan.txt",
        ))
        .await?;

    workspace.tasks.permanently_delete_task(task.id()).await?;

    let comments = workspace
        .comments
        .list_comments(&CommentQuery {
            task_id: Some(task.id()),
            include_deleted: true,
            ..CommentQuery::default()
        })
        .await?;
    let logs = workspace
        .time_logs
        .list_time_logs(&TimeLogQuery {
            task_id: Some(task.id()),
            ..TimeLogQuery::default()
        })
        .await?;
    let files = workspace
        .attachments
        .list_attachments(&AttachmentQuery {
            task_id: Some(task.id()),
            ..AttachmentQuery::default()
        })
        .await?;
    ensure!(workspace.comments.count_comments(task.id()).await? == 0);
    ensure!(comments.total == 0);
    ensure!(logs.total == 0);
    ensure!(files.total == 0);
    ensure!(workspace.comments.get_comment(note.id()).await.is_err());
    Ok(())
}
