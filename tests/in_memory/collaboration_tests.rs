//! Comments, attachments, and time logs gathered on a shared task.

use super::helpers::{Workspace, workspace};
use chrono::{Duration, Utc};
use eyre::{bail, ensure};
use quadrant::attachment::services::{AttachmentServiceError, CreateAttachmentRequest};
use quadrant::comment::services::{CommentServiceError, CreateCommentRequest};
use quadrant::error::{Classify, ErrorKind};
use quadrant::task::domain::TaskId;
use quadrant::task::services::CreateTaskRequest;
use quadrant::time_log::domain::{TimeLogDomainError, format_duration};
use quadrant::time_log::services::{RecordTimeLogRequest, TimeLogServiceError, UpdateTimeLogRequest};
use quadrant::user::domain::UserId;
use quadrant::user::services::CreateUserRequest;
use rstest::rstest;

async fn shared_task(workspace: &Workspace) -> eyre::Result<(TaskId, UserId, UserId)> {
    let author = workspace
        .users
        .create_user(CreateUserRequest::new("owner", "Owner", "owner@example.com"))
        .await?;
    let reviewer = workspace
        .users
        .create_user(CreateUserRequest::new("reviewer", "Reviewer", "reviewer@example.com"))
        .await?;
    let task = workspace
        .tasks
        .create_task(CreateTaskRequest::new("Design review", author.id()).with_assignee(reviewer.id()))
        .await?;
    Ok((task.id(), author.id(), reviewer.id()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discussion_threads_replies_under_roots(workspace: Workspace) -> eyre::Result<()> {
    let (task, author, reviewer) = shared_task(&workspace).await?;
    let question = workspace
        .comments
        .create_comment(CreateCommentRequest::new(task, reviewer, "<b>Ready</b> for   review?"))
        .await?;
    workspace
        .comments
        .create_comment(CreateCommentRequest::new(task, author, "Yes").replying_to(question.id()))
        .await?;
    workspace
        .comments
        .create_comment(CreateCommentRequest::new(task, author, "Second topic"))
        .await?;

    let threads = workspace.comments.threaded_comments(task).await?;
    let [first, second] = threads.as_slice() else {
        bail!("expected two root threads");
    };
    ensure!(first.comment.content().as_str() == "Ready for review?");
    ensure!(first.reply_count == 1);
    ensure!(second.replies.is_empty());
    ensure!(workspace.comments.count_comments(task).await? == 3);

    let Err(err) = workspace
        .comments
        .update_comment(question.id(), author, "hijacked")
        .await
    else {
        bail!("expected only the author to edit");
    };
    ensure!(matches!(err, CommentServiceError::Domain(_)));
    ensure!(err.kind() == ErrorKind::Forbidden);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploads_follow_task_lifecycle(workspace: Workspace) -> eyre::Result<()> {
    let (task, author, _) = shared_task(&workspace).await?;
    let mockup = workspace
        .attachments
        .create_attachment(CreateAttachmentRequest::new(
            task,
            author,
            "mockup.png",
            4096,
            "image/png",
            "uploads/mockup.png",
        ))
        .await?;
    ensure!(workspace.attachments.list_task_attachments(task).await? == vec![mockup]);

    workspace.tasks.delete_task(task).await?;
    let late = workspace
        .attachments
        .create_attachment(CreateAttachmentRequest::new(
            task,
            author,
            "late.png",
            10,
            "image/png",
            "uploads/late.png",
        ))
        .await;
    ensure!(matches!(late, Err(AttachmentServiceError::TaskDeleted(_))));
    ensure!(workspace.attachments.list_task_attachments(task).await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn time_tracking_allows_one_running_log(workspace: Workspace) -> eyre::Result<()> {
    let (task, _, reviewer) = shared_task(&workspace).await?;
    let running = workspace
        .time_logs
        .start_time_log(task, reviewer, Some("reading the brief".to_owned()))
        .await?;

    let Err(second) = workspace.time_logs.start_time_log(task, reviewer, None).await else {
        bail!("expected a second running log to be refused");
    };
    ensure!(matches!(
        second,
        TimeLogServiceError::Domain(TimeLogDomainError::ActiveLogExists(_))
    ));
    ensure!(second.kind() == ErrorKind::Conflict);
    ensure!(workspace.time_logs.active_time_logs(reviewer).await?.len() == 1);

    let stopped = workspace
        .time_logs
        .end_time_log(
            running.id(),
            UpdateTimeLogRequest::new().ending_at(running.started_at() + Duration::minutes(90)),
        )
        .await?;
    ensure!(stopped.duration_seconds() == Some(5400));
    ensure!(format_duration(5400) == "1h 30m");
    ensure!(workspace.time_logs.active_time_logs(reviewer).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recorded_intervals_must_not_overlap(workspace: Workspace) -> eyre::Result<()> {
    let (task, _, reviewer) = shared_task(&workspace).await?;
    let start = Utc::now() - Duration::days(1);
    workspace
        .time_logs
        .record_time_log(RecordTimeLogRequest::new(
            task,
            reviewer,
            start,
            start + Duration::hours(2),
        ))
        .await?;

    let clash = workspace
        .time_logs
        .record_time_log(RecordTimeLogRequest::new(
            task,
            reviewer,
            start + Duration::hours(1),
            start + Duration::hours(3),
        ))
        .await;
    let adjacent = workspace
        .time_logs
        .record_time_log(RecordTimeLogRequest::new(
            task,
            reviewer,
            start + Duration::hours(2),
            start + Duration::hours(3),
        ))
        .await;

    ensure!(matches!(
        clash,
        Err(TimeLogServiceError::Domain(TimeLogDomainError::Overlap { .. }))
    ));
    ensure!(adjacent.is_ok());
    ensure!(workspace.time_logs.list_task_time_logs(task).await?.len() == 2);
    Ok(())
}
