//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use todoapp::task::{
    domain::TaskDomainError,
    services::{MissingReference, TaskLifecycleError},
};

fn last_error(world: &TaskLifecycleWorld) -> Result<&TaskLifecycleError, eyre::Report> {
    world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))
}

#[then(r#"the task is open with tags "{first}" and "{second}""#)]
fn task_is_open_with_tags(
    world: &TaskLifecycleWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(!task.done, "new task should not be done");
    eyre::ensure!(task.canceled_at.is_none(), "new task should not be cancelled");
    eyre::ensure!(
        task.tags == vec![first, second],
        "unexpected tags {:?}",
        task.tags
    );
    Ok(())
}

#[then("the task is done")]
fn task_is_done(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.task()?.done, "task should be done");
    Ok(())
}

#[then("the task is done and cancelled")]
fn task_is_done_and_cancelled(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(task.done, "cancellation should not clear the done flag");
    eyre::ensure!(task.canceled_at.is_some(), "task should be cancelled");
    Ok(())
}

#[then("the task is open and cancelled")]
fn task_is_open_and_cancelled(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(!task.done, "cancellation should not mark the task done");
    eyre::ensure!(task.canceled_at.is_some(), "task should be cancelled");
    Ok(())
}

#[then("the active task list is empty")]
fn active_list_is_empty(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let active = run_async(world.service.list_active())?;
    eyre::ensure!(active.is_empty(), "expected no active tasks, got {active:?}");
    Ok(())
}

#[then("creation fails because the user does not exist")]
fn creation_fails_for_user(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(
            err,
            TaskLifecycleError::Reference(MissingReference::User(_))
        ),
        "expected missing user error, got {err:?}"
    );
    Ok(())
}

#[then("creation fails because the title is blank")]
fn creation_fails_for_title(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(
            err,
            TaskLifecycleError::Validation(TaskDomainError::EmptyTitle)
        ),
        "expected blank title error, got {err:?}"
    );
    Ok(())
}

#[then("no task has been stored")]
fn no_task_stored(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.tasks.is_empty()?, "no task should have been stored");
    Ok(())
}

#[then("the operation fails because the task does not exist")]
fn operation_fails_not_found(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TaskLifecycleError::NotFound(_)),
        "expected not found error, got {err:?}"
    );
    Ok(())
}

#[then("the cancellation time is unchanged")]
fn cancellation_time_unchanged(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let first = world
        .first_cancelled_at
        .ok_or_else(|| eyre::eyre!("first cancellation time was not recorded"))?;
    let current = world.task()?.canceled_at;
    eyre::ensure!(
        current == Some(first),
        "cancellation time moved from {first} to {current:?}"
    );
    Ok(())
}
