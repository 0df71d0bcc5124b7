//! Given steps for task lifecycle rule scenarios.

use super::world::{TaskRulesWorld, run_async};
use eyre::WrapErr;
use quadrant::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use quadrant::user::domain::UserId;
use rstest_bdd_macros::given;

#[given(r#"a task "{title}" that is important but not urgent"#)]
fn important_task(world: &mut TaskRulesWorld, title: String) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title, UserId::new(1)?).with_flags(true, false);
    let created = run_async(world.service.create_task(request)).wrap_err("create scenario task")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"the task status has been set to "{status}""#)]
fn status_has_been_set(world: &mut TaskRulesWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())?;
    let id = world.task()?.id();
    let updated = run_async(
        world
            .service
            .update_task(id, UpdateTaskRequest::new().with_status(target)),
    )
    .wrap_err("set scenario task status")?;
    world.task = Some(updated);
    Ok(())
}
