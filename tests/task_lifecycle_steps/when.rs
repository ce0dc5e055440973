//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use todoapp::task::{
    domain::{TaskId, UserId},
    services::CreateTaskRequest,
};

fn record_creation(world: &mut TaskLifecycleWorld, request: CreateTaskRequest) {
    match run_async(world.service.create(request)) {
        Ok(created) => world.last_task = Some(created),
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#"the user creates a task titled "{title}" tagged "{first}" and "{second}""#)]
fn create_tagged_task(
    world: &mut TaskLifecycleWorld,
    title: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let (user, category) = world.owner()?;
    let tag_ids = [world.tag(&first)?, world.tag(&second)?];
    record_creation(
        world,
        CreateTaskRequest::new(title, user, category).with_tag_ids(tag_ids),
    );
    Ok(())
}

#[when(r#"a task titled "{title}" is created for an unknown user"#)]
fn create_for_unknown_user(
    world: &mut TaskLifecycleWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let (user, category) = world.owner()?;
    let ghost = UserId::new(user.value() + 100)?;
    record_creation(world, CreateTaskRequest::new(title, ghost, category));
    Ok(())
}

#[when("the user creates a task with a blank title")]
fn create_with_blank_title(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let (user, category) = world.owner()?;
    record_creation(world, CreateTaskRequest::new("   ", user, category));
    Ok(())
}

#[when("the task status is toggled")]
fn toggle_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id;
    let toggled =
        run_async(world.service.toggle_status(id)).wrap_err("toggle task in scenario")?;
    world.last_task = Some(toggled);
    Ok(())
}

#[when("the task is cancelled")]
fn cancel_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id;
    run_async(world.service.cancel(id)).wrap_err("cancel task in scenario")?;
    let cancelled_at = world.reload()?.canceled_at;
    world.first_cancelled_at = cancelled_at;
    Ok(())
}

#[when("the task is cancelled again")]
fn cancel_task_again(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id;
    run_async(world.service.cancel(id)).wrap_err("cancel task again in scenario")?;
    world.reload()?;
    Ok(())
}

#[when("the status of task {id:i64} is toggled")]
fn toggle_missing_task(world: &mut TaskLifecycleWorld, id: i64) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id)?;
    if let Err(err) = run_async(world.service.toggle_status(task_id)) {
        world.last_error = Some(err);
    }
    Ok(())
}
