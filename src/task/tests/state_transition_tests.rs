//! Unit tests for the pure task lifecycle rules.

use crate::task::domain::{
    EisenhowerQuadrant, TaskDomainError, TaskId, TaskStatus,
    rules::{
        calculate_eisenhower_quadrant, can_update_priority, can_update_status,
        ensure_date_range, ensure_priority_change, ensure_status_change, is_overdue,
        is_valid_date_range, is_valid_progress,
    },
};
use crate::test_support::instant;
use chrono::Duration;
use rstest::rstest;

#[rstest]
#[case(true, true, EisenhowerQuadrant::DoFirst, 1)]
#[case(true, false, EisenhowerQuadrant::Schedule, 2)]
#[case(false, true, EisenhowerQuadrant::Delegate, 3)]
#[case(false, false, EisenhowerQuadrant::Eliminate, 4)]
fn quadrant_follows_the_fixed_table(
    #[case] importance: bool,
    #[case] urgency: bool,
    #[case] expected: EisenhowerQuadrant,
    #[case] number: u8,
) {
    let quadrant = calculate_eisenhower_quadrant(importance, urgency);

    assert_eq!(quadrant, expected);
    assert_eq!(quadrant.number(), number);
}

#[rstest]
fn done_can_only_stay_done() {
    for next in TaskStatus::ALL {
        assert_eq!(
            can_update_status(TaskStatus::Done, next),
            next == TaskStatus::Done,
            "DONE -> {next}"
        );
    }
}

#[rstest]
#[case(TaskStatus::Todo)]
#[case(TaskStatus::Doing)]
#[case(TaskStatus::Pending)]
fn open_statuses_may_move_anywhere(#[case] current: TaskStatus) {
    for next in TaskStatus::ALL {
        assert!(can_update_status(current, next), "{current} -> {next}");
    }
}

#[rstest]
#[case(TaskStatus::Todo, true)]
#[case(TaskStatus::Doing, true)]
#[case(TaskStatus::Pending, true)]
#[case(TaskStatus::Done, false)]
fn priority_is_frozen_only_when_done(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(can_update_priority(status), expected);
}

#[rstest]
#[case(0, true)]
#[case(50, true)]
#[case(100, true)]
#[case(-1, false)]
#[case(101, false)]
fn progress_bounds_are_inclusive(#[case] progress: i64, #[case] expected: bool) {
    assert_eq!(is_valid_progress(progress), expected);
}

#[rstest]
fn date_range_accepts_missing_and_equal_bounds() {
    let start = instant("2024-03-01T00:00:00Z");

    assert!(is_valid_date_range(None, None));
    assert!(is_valid_date_range(Some(start), None));
    assert!(is_valid_date_range(None, Some(start)));
    assert!(is_valid_date_range(Some(start), Some(start)));
}

#[rstest]
#[case(Duration::milliseconds(1))]
#[case(Duration::days(30))]
fn date_range_rejects_start_after_end(#[case] gap: Duration) {
    let end = instant("2024-03-01T00:00:00Z");
    let start = end + gap;

    assert!(!is_valid_date_range(Some(start), Some(end)));
    assert_eq!(
        ensure_date_range(Some(start), Some(end)),
        Err(TaskDomainError::InvalidDateRange { start, end })
    );
}

#[rstest]
fn overdue_requires_a_past_due_date() {
    let now = instant("2024-03-01T12:00:00Z");

    assert!(!is_overdue(None, now));
    assert!(!is_overdue(Some(now), now));
    assert!(!is_overdue(Some(now + Duration::minutes(1)), now));
    assert!(is_overdue(Some(now - Duration::minutes(1)), now));
}

#[rstest]
fn ensure_forms_name_the_rejected_field() -> eyre::Result<()> {
    let task_id = TaskId::new(7)?;

    let status = ensure_status_change(task_id, TaskStatus::Done, TaskStatus::Todo);
    let priority = ensure_priority_change(task_id, TaskStatus::Done);

    assert_eq!(
        status,
        Err(TaskDomainError::StatusFrozen {
            task_id,
            to: TaskStatus::Todo
        })
    );
    assert_eq!(priority, Err(TaskDomainError::PriorityFrozen(task_id)));
    assert_eq!(
        status.err().and_then(|err| err.field()),
        Some("status")
    );
    assert_eq!(ensure_status_change(task_id, TaskStatus::Done, TaskStatus::Done), Ok(()));
    assert_eq!(ensure_priority_change(task_id, TaskStatus::Doing), Ok(()));
    Ok(())
}

#[rstest]
#[case("todo", TaskStatus::Todo)]
#[case(" DOING ", TaskStatus::Doing)]
#[case("Pending", TaskStatus::Pending)]
#[case("DONE", TaskStatus::Done)]
fn status_parsing_is_case_insensitive(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn quadrant_serialises_as_its_number() -> eyre::Result<()> {
    let json = serde_json::to_string(&EisenhowerQuadrant::Delegate)?;
    let parsed: EisenhowerQuadrant = serde_json::from_str("2")?;

    assert_eq!(json, "3");
    assert_eq!(parsed, EisenhowerQuadrant::Schedule);
    assert!(serde_json::from_str::<EisenhowerQuadrant>("5").is_err());
    Ok(())
}
