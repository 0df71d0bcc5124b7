//! Domain-focused tests for the task aggregate and its value types.

use crate::paging::SortOrder;
use crate::task::domain::{
    DeletedFilter, EisenhowerQuadrant, EstimatedMinutes, Priority, Progress, ScheduleWindow,
    Task, TaskChanges, TaskDescription, TaskDomainError, TaskDraft, TaskId, TaskQuery,
    TaskSortField, TaskStatus, TaskTitle,
};
use crate::test_support::{FixedClock, instant};
use crate::user::domain::UserId;
use chrono::Duration;
use eyre::{bail, ensure};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> FixedClock {
    FixedClock::default()
}

fn task_with(id: i64, title: &str, clock: &FixedClock) -> Result<Task, eyre::Report> {
    let draft = TaskDraft::new(TaskTitle::new(title)?, UserId::new(1)?, clock);
    Ok(Task::from_draft(TaskId::new(id)?, draft))
}

#[fixture]
fn todo_task(clock: FixedClock) -> Result<Task, eyre::Report> {
    task_with(1, "Write quarterly report", &clock)
}

#[rstest]
#[case("")]
#[case("   ")]
fn title_rejects_blank_values(#[case] raw: &str) {
    assert_eq!(TaskTitle::new(raw), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn title_is_trimmed_and_bounded() -> eyre::Result<()> {
    let title = TaskTitle::new("  Plan sprint  ")?;
    ensure!(title.as_str() == "Plan sprint");

    let longest = "x".repeat(TaskTitle::MAX_LENGTH);
    ensure!(TaskTitle::new(longest).is_ok());
    let too_long = TaskTitle::new("x".repeat(TaskTitle::MAX_LENGTH + 1));
    ensure!(too_long == Err(TaskDomainError::TitleTooLong { max: 100 }));
    Ok(())
}

#[rstest]
fn description_is_bounded() {
    assert!(TaskDescription::new("y".repeat(500)).is_ok());
    assert_eq!(
        TaskDescription::new("y".repeat(501)),
        Err(TaskDomainError::DescriptionTooLong { max: 500 })
    );
}

#[rstest]
#[case(0)]
#[case(-5)]
fn identifiers_must_be_positive(#[case] raw: i64) {
    assert_eq!(TaskId::new(raw), Err(TaskDomainError::InvalidTaskId(raw)));
}

#[rstest]
#[case(-1)]
#[case(101)]
fn progress_outside_range_is_rejected(#[case] raw: i64) {
    assert_eq!(Progress::new(raw), Err(TaskDomainError::InvalidProgress(raw)));
}

#[rstest]
#[case(0)]
#[case(-30)]
fn estimate_must_be_positive(#[case] raw: i64) {
    assert_eq!(
        EstimatedMinutes::new(raw),
        Err(TaskDomainError::InvalidEstimate(raw))
    );
}

#[rstest]
fn new_task_starts_todo_medium_in_quadrant_four(
    todo_task: Result<Task, eyre::Report>,
) -> eyre::Result<()> {
    let task = todo_task?;

    ensure!(task.status() == TaskStatus::Todo);
    ensure!(task.priority() == Priority::Medium);
    ensure!(task.quadrant() == EisenhowerQuadrant::Eliminate);
    ensure!(task.progress() == Progress::ZERO);
    ensure!(task.revision() == 0);
    ensure!(!task.is_deleted());
    ensure!(task.created_at() == task.updated_at());
    Ok(())
}

#[rstest]
fn quadrant_is_recomputed_when_flags_change(
    clock: FixedClock,
    todo_task: Result<Task, eyre::Report>,
) -> eyre::Result<()> {
    let mut task = todo_task?;
    task.apply_changes(
        TaskChanges {
            importance: Some(true),
            ..TaskChanges::default()
        },
        &clock,
    )?;
    ensure!(task.quadrant() == EisenhowerQuadrant::Schedule);

    task.apply_changes(
        TaskChanges {
            urgency: Some(true),
            ..TaskChanges::default()
        },
        &clock,
    )?;
    ensure!(task.quadrant() == EisenhowerQuadrant::DoFirst);
    Ok(())
}

#[rstest]
fn completed_task_rejects_reopening_and_priority_change(
    clock: FixedClock,
    todo_task: Result<Task, eyre::Report>,
) -> eyre::Result<()> {
    let mut task = todo_task?;
    task.apply_changes(
        TaskChanges {
            status: Some(TaskStatus::Done),
            ..TaskChanges::default()
        },
        &clock,
    )?;
    let snapshot = task.clone();

    let reopen = task.apply_changes(
        TaskChanges {
            status: Some(TaskStatus::Todo),
            title: Some(TaskTitle::new("Renamed")?),
            ..TaskChanges::default()
        },
        &clock,
    );
    let reprioritise = task.apply_changes(
        TaskChanges {
            priority: Some(Priority::High),
            ..TaskChanges::default()
        },
        &clock,
    );

    let expected_reopen = Err(TaskDomainError::StatusFrozen {
        task_id: task.id(),
        to: TaskStatus::Todo,
    });
    if reopen != expected_reopen {
        bail!("expected {expected_reopen:?}, got {reopen:?}");
    }
    ensure!(reprioritise == Err(TaskDomainError::PriorityFrozen(task.id())));
    ensure!(task == snapshot, "rejected updates must not change the task");
    Ok(())
}

#[rstest]
fn done_to_done_is_an_allowed_no_op(
    clock: FixedClock,
    todo_task: Result<Task, eyre::Report>,
) -> eyre::Result<()> {
    let mut task = todo_task?;
    let done = TaskChanges {
        status: Some(TaskStatus::Done),
        ..TaskChanges::default()
    };
    task.apply_changes(done.clone(), &clock)?;
    task.apply_changes(done, &clock)?;

    ensure!(task.status() == TaskStatus::Done);
    Ok(())
}

#[rstest]
fn schedule_is_validated_against_stored_bounds(
    clock: FixedClock,
    todo_task: Result<Task, eyre::Report>,
) -> eyre::Result<()> {
    let mut task = todo_task?;
    let start = instant("2024-02-10T00:00:00Z");
    let early_end = instant("2024-02-01T00:00:00Z");
    task.apply_changes(
        TaskChanges {
            scheduled_start: Some(Some(start)),
            ..TaskChanges::default()
        },
        &clock,
    )?;

    let result = task.apply_changes(
        TaskChanges {
            scheduled_end: Some(Some(early_end)),
            ..TaskChanges::default()
        },
        &clock,
    );

    ensure!(
        result
            == Err(TaskDomainError::InvalidDateRange {
                start,
                end: early_end
            })
    );
    ensure!(task.schedule().end().is_none());
    Ok(())
}

#[rstest]
fn nullable_fields_can_be_cleared(
    clock: FixedClock,
    todo_task: Result<Task, eyre::Report>,
) -> eyre::Result<()> {
    let mut task = todo_task?;
    task.apply_changes(
        TaskChanges {
            description: Some(Some(TaskDescription::new("Numbers from finance")?)),
            due_date: Some(Some(instant("2024-01-05T00:00:00Z"))),
            assigned_to: Some(Some(UserId::new(2)?)),
            ..TaskChanges::default()
        },
        &clock,
    )?;

    task.apply_changes(
        TaskChanges {
            description: Some(None),
            due_date: Some(None),
            assigned_to: Some(None),
            ..TaskChanges::default()
        },
        &clock,
    )?;

    ensure!(task.description().is_none());
    ensure!(task.due_date().is_none());
    ensure!(task.assigned_to().is_none());
    Ok(())
}

#[rstest]
fn task_cannot_parent_itself(
    clock: FixedClock,
    todo_task: Result<Task, eyre::Report>,
) -> eyre::Result<()> {
    let mut task = todo_task?;
    let result = task.apply_changes(
        TaskChanges {
            parent_id: Some(Some(task.id())),
            ..TaskChanges::default()
        },
        &clock,
    );

    ensure!(result == Err(TaskDomainError::SelfParent(task.id())));
    Ok(())
}

#[rstest]
fn soft_delete_and_restore_toggle_the_marker(
    clock: FixedClock,
    todo_task: Result<Task, eyre::Report>,
) -> eyre::Result<()> {
    let mut task = todo_task?;
    clock.advance(Duration::hours(1));
    let at = mockable::Clock::utc(&clock);

    task.mark_deleted(at)?;
    ensure!(task.deleted_at() == Some(at));
    ensure!(task.mark_deleted(at) == Err(TaskDomainError::AlreadyDeleted(task.id())));

    task.restore(at)?;
    ensure!(!task.is_deleted());
    ensure!(task.restore(at) == Err(TaskDomainError::NotDeleted(task.id())));
    Ok(())
}

#[rstest]
fn schedule_window_merge_keeps_untouched_bound() -> eyre::Result<()> {
    let start = instant("2024-04-01T00:00:00Z");
    let end = instant("2024-04-03T00:00:00Z");
    let window = ScheduleWindow::new(Some(start), Some(end))?;

    let cleared = window.merged(Some(None), None)?;

    ensure!(cleared.start().is_none());
    ensure!(cleared.end() == Some(end));
    Ok(())
}

#[rstest]
fn query_filters_on_quadrant_search_and_deletion(clock: FixedClock) -> eyre::Result<()> {
    let now = mockable::Clock::utc(&clock);
    let mut urgent = task_with(1, "Fix outage", &clock)?;
    urgent.apply_changes(
        TaskChanges {
            importance: Some(true),
            urgency: Some(true),
            due_date: Some(Some(now - Duration::hours(2))),
            ..TaskChanges::default()
        },
        &clock,
    )?;
    let mut deleted = task_with(2, "Old outage notes", &clock)?;
    deleted.mark_deleted(now)?;

    let by_quadrant = TaskQuery {
        quadrant: Some(EisenhowerQuadrant::DoFirst),
        ..TaskQuery::default()
    };
    let by_search = TaskQuery {
        search: Some("OUTAGE".to_owned()),
        ..TaskQuery::default()
    };
    let deleted_only = TaskQuery {
        deleted: DeletedFilter::DeletedOnly,
        ..by_search.clone()
    };
    let overdue = TaskQuery {
        overdue: Some(true),
        ..TaskQuery::default()
    };

    ensure!(by_quadrant.matches(&urgent, now));
    ensure!(by_search.matches(&urgent, now));
    ensure!(!by_search.matches(&deleted, now));
    ensure!(deleted_only.matches(&deleted, now));
    ensure!(!deleted_only.matches(&urgent, now));
    ensure!(overdue.matches(&urgent, now));
    Ok(())
}

#[rstest]
fn query_sorts_by_title_then_id(clock: FixedClock) -> eyre::Result<()> {
    let alpha = task_with(2, "alpha", &clock)?;
    let beta = task_with(1, "Beta", &clock)?;
    let query = TaskQuery {
        sort: TaskSortField::Title,
        order: SortOrder::Asc,
        ..TaskQuery::default()
    };

    ensure!(query.compare(&alpha, &beta).is_lt());
    ensure!(
        TaskQuery {
            order: SortOrder::Desc,
            ..query
        }
        .compare(&alpha, &beta)
        .is_gt()
    );
    Ok(())
}
