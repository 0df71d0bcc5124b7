//! Then steps for task lifecycle rule scenarios.

use super::world::{TaskRulesWorld, run_async};
use quadrant::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskServiceError,
};
use rstest_bdd_macros::then;

#[then("the task is in quadrant {number:u8}")]
fn task_in_quadrant(world: &TaskRulesWorld, number: u8) -> Result<(), eyre::Report> {
    let quadrant = world.task()?.quadrant();
    eyre::ensure!(
        quadrant.number() == number,
        "expected quadrant {number}, found {}",
        quadrant.number()
    );
    Ok(())
}

#[then("the update is rejected because the status is frozen")]
fn status_frozen(world: &TaskRulesWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskServiceError::Domain(TaskDomainError::StatusFrozen { .. }))
        ),
        "expected StatusFrozen, got {result:?}"
    );
    Ok(())
}

#[then("the update is rejected because the priority is frozen")]
fn priority_frozen(world: &TaskRulesWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskServiceError::Domain(TaskDomainError::PriorityFrozen(_)))
        ),
        "expected PriorityFrozen, got {result:?}"
    );
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn stored_status_is(world: &TaskRulesWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let id = world.task()?.id();
    let stored = run_async(world.service.get_task(id))?;
    eyre::ensure!(
        stored.task.status() == expected,
        "expected stored status {expected}, found {}",
        stored.task.status()
    );
    Ok(())
}
