//! Tests for grouping flat comment lists into reply threads.

use crate::comment::domain::{
    Comment, CommentContent, CommentId, OrphanPolicy, PersistedCommentData, assemble_threads,
};
use crate::task::domain::TaskId;
use crate::test_support::instant;
use crate::user::domain::UserId;
use eyre::{bail, ensure};
use rstest::rstest;

fn comment(id: i64, parent: Option<i64>) -> Result<Comment, eyre::Report> {
    let at = instant("2024-01-01T09:00:00Z");
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::new(id)?,
        task_id: TaskId::new(1)?,
        author_id: UserId::new(1)?,
        content: CommentContent::new(&format!("comment {id}"), 100)?,
        parent_id: parent.map(CommentId::new).transpose()?,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }))
}

fn ids(comments: &[Comment]) -> Vec<i64> {
    comments.iter().map(|c| c.id().value()).collect()
}

#[rstest]
fn root_collects_its_direct_replies() -> eyre::Result<()> {
    let batch = vec![comment(1, None)?, comment(2, Some(1))?, comment(3, Some(1))?];

    let threads = assemble_threads(&batch, OrphanPolicy::Drop);

    let [thread] = threads.as_slice() else {
        bail!("expected one root thread, got {}", threads.len());
    };
    ensure!(thread.comment.id().value() == 1);
    ensure!(thread.replies.len() == 2);
    ensure!(thread.reply_count == 2);
    let reply_ids: Vec<i64> = thread.replies.iter().map(|r| r.comment.id().value()).collect();
    ensure!(reply_ids == vec![2, 3]);
    Ok(())
}

#[rstest]
fn orphan_is_dropped_by_default() -> eyre::Result<()> {
    let batch = vec![comment(1, Some(99))?];

    ensure!(assemble_threads(&batch, OrphanPolicy::default()).is_empty());
    Ok(())
}

#[rstest]
fn orphan_can_be_promoted_to_root() -> eyre::Result<()> {
    let batch = vec![comment(1, Some(99))?, comment(2, Some(1))?];

    let threads = assemble_threads(&batch, OrphanPolicy::PromoteToRoot);

    let [thread] = threads.as_slice() else {
        bail!("expected the orphan as the only root");
    };
    ensure!(thread.comment.id().value() == 1);
    ensure!(thread.reply_count == 1);
    Ok(())
}

#[rstest]
#[case(OrphanPolicy::Drop)]
#[case(OrphanPolicy::PromoteToRoot)]
fn empty_input_yields_no_threads(#[case] policy: OrphanPolicy) {
    assert!(assemble_threads(&[], policy).is_empty());
}

#[rstest]
fn nesting_stops_at_one_level() -> eyre::Result<()> {
    let batch = vec![
        comment(1, None)?,
        comment(2, Some(1))?,
        comment(3, Some(2))?,
        comment(4, Some(2))?,
    ];

    let threads = assemble_threads(&batch, OrphanPolicy::Drop);

    let [thread] = threads.as_slice() else {
        bail!("expected one root thread");
    };
    let [reply] = thread.replies.as_slice() else {
        bail!("expected a single direct reply");
    };
    ensure!(reply.comment.id().value() == 2);
    ensure!(reply.reply_count == 2);
    Ok(())
}

#[rstest]
fn roots_keep_input_order_and_input_is_untouched() -> eyre::Result<()> {
    let batch = vec![
        comment(5, None)?,
        comment(2, None)?,
        comment(7, Some(2))?,
        comment(9, None)?,
    ];
    let before = batch.clone();

    let threads = assemble_threads(&batch, OrphanPolicy::Drop);

    let roots: Vec<i64> = threads.iter().map(|t| t.comment.id().value()).collect();
    ensure!(roots == vec![5, 2, 9]);
    ensure!(threads.iter().map(|t| t.reply_count).sum::<usize>() == 1);
    ensure!(ids(&batch) == ids(&before));
    Ok(())
}

#[rstest]
fn repeated_ids_are_threaded_once() -> eyre::Result<()> {
    let batch = vec![
        comment(1, None)?,
        comment(2, Some(1))?,
        comment(1, None)?,
        comment(2, Some(1))?,
    ];

    let threads = assemble_threads(&batch, OrphanPolicy::Drop);

    let [thread] = threads.as_slice() else {
        bail!("expected one root thread");
    };
    let reply_ids: Vec<i64> = thread.replies.iter().map(|r| r.comment.id().value()).collect();
    ensure!(reply_ids == vec![2]);
    ensure!(thread.reply_count == 1);
    Ok(())
}
