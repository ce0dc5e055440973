//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todoapp::task::{
    domain::{NewCategory, NewTag, NewUser},
    ports::{CategoryRepository, TagRepository, UserRepository},
    services::CreateTaskRequest,
};

#[given(r#"a user "{name}" with a category "{category}""#)]
fn user_with_category(
    world: &mut TaskLifecycleWorld,
    name: String,
    category: String,
) -> Result<(), eyre::Report> {
    let email = format!("{name}@example.com");
    let user = run_async(world.users.insert(NewUser::new(name, email)?))
        .wrap_err("seed user for lifecycle scenario")?;
    let stored = run_async(world.categories.insert(NewCategory::new(category, user.id())?))
        .wrap_err("seed category for lifecycle scenario")?;
    world.user_id = Some(user.id());
    world.category_id = Some(stored.id());
    Ok(())
}

#[given(r#"the user owns the tags "{first}" and "{second}""#)]
fn user_owns_tags(
    world: &mut TaskLifecycleWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let (user, _) = world.owner()?;
    for name in [first, second] {
        let tag = run_async(world.tags.insert(NewTag::new(name.clone(), user)?))
            .wrap_err("seed tag for lifecycle scenario")?;
        world.tag_ids.insert(name, tag.id());
    }
    Ok(())
}

#[given(r#"the user has a task titled "{title}""#)]
fn user_has_task(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let (user, category) = world.owner()?;
    let created = run_async(
        world
            .service
            .create(CreateTaskRequest::new(title, user, category)),
    )
    .wrap_err("create task for lifecycle scenario")?;
    world.last_task = Some(created);
    Ok(())
}
