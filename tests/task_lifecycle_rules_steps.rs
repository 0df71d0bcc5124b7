//! Behaviour tests for quadrant classification and completed-task guards.

#[path = "task_lifecycle_rules_steps/mod.rs"]
mod task_lifecycle_rules_steps_defs;

use rstest_bdd_macros::scenario;
use task_lifecycle_rules_steps_defs::world::{TaskRulesWorld, world};

#[scenario(
    path = "tests/features/task_lifecycle_rules.feature",
    name = "Quadrant follows importance and urgency"
)]
#[tokio::test(flavor = "multi_thread")]
async fn quadrant_follows_flags(world: TaskRulesWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle_rules.feature",
    name = "A completed task cannot be reopened"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_cannot_be_reopened(world: TaskRulesWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle_rules.feature",
    name = "A completed task keeps its priority"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_keeps_priority(world: TaskRulesWorld) {
    let _ = world;
}
