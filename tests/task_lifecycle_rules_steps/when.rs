//! When steps for task lifecycle rule scenarios.

use super::world::{TaskRulesWorld, run_async};
use quadrant::task::{
    domain::{Priority, TaskStatus},
    services::UpdateTaskRequest,
};
use rstest_bdd_macros::when;

fn apply(world: &mut TaskRulesWorld, request: UpdateTaskRequest) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let result = run_async(world.service.update_task(id, request));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_update = Some(result);
    Ok(())
}

#[when("the task is marked urgent")]
fn mark_urgent(world: &mut TaskRulesWorld) -> Result<(), eyre::Report> {
    apply(world, UpdateTaskRequest::new().with_urgency(true))
}

#[when(r#"the task status is changed to "{status}""#)]
fn change_status(world: &mut TaskRulesWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())?;
    apply(world, UpdateTaskRequest::new().with_status(target))
}

#[when(r#"the task priority is changed to "{priority}""#)]
fn change_priority(world: &mut TaskRulesWorld, priority: String) -> Result<(), eyre::Report> {
    let target = Priority::try_from(priority.as_str())?;
    apply(world, UpdateTaskRequest::new().with_priority(target))
}
