//! In-memory integration tests for active task listings.

use super::helpers::{TestContext, context};
use rstest::rstest;
use todoapp::task::services::TaskView;

fn titles(views: &[TaskView]) -> Vec<&str> {
    views.iter().map(|view| view.title.as_str()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_lists_nothing(context: TestContext) -> eyre::Result<()> {
    let active = context.service.list_active().await?;
    eyre::ensure!(active.is_empty(), "expected no tasks, got {active:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_tasks_are_ordered_by_id(context: TestContext) -> eyre::Result<()> {
    let owner = context.add_user("ada").await?;
    let category = context.add_category("Errands", owner).await?;
    for title in ["Buy milk", "Post letter", "Return books"] {
        context.add_task(title, owner, category).await?;
    }

    let active = context.service.list_active().await?;

    eyre::ensure!(
        titles(&active) == vec!["Buy milk", "Post letter", "Return books"],
        "unexpected order: {:?}",
        titles(&active)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggled_tasks_stay_listed_until_cancelled(context: TestContext) -> eyre::Result<()> {
    let owner = context.add_user("ada").await?;
    let category = context.add_category("Errands", owner).await?;
    let done = context.add_task("Buy milk", owner, category).await?;
    let dropped = context.add_task("Post letter", owner, category).await?;

    context.service.toggle_status(done.id).await?;
    context.service.cancel(dropped.id).await?;

    let active = context.service.list_active().await?;
    eyre::ensure!(
        titles(&active) == vec!["Buy milk"],
        "unexpected listing: {:?}",
        titles(&active)
    );
    eyre::ensure!(
        active.first().is_some_and(|view| view.done),
        "completed task should be listed as done"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_listing_only_shows_that_users_tasks(context: TestContext) -> eyre::Result<()> {
    let ada = context.add_user("ada").await?;
    let bob = context.add_user("bob").await?;
    let errands = context.add_category("Errands", ada).await?;
    let garden = context.add_category("Garden", bob).await?;
    context.add_task("Buy milk", ada, errands).await?;
    context.add_task("Mow lawn", bob, garden).await?;
    context.add_task("Post letter", ada, errands).await?;

    let for_bob = context.service.list_active_for_user(bob).await?;
    let for_ada = context.service.list_active_for_user(ada).await?;

    eyre::ensure!(titles(&for_bob) == vec!["Mow lawn"], "bob sees {:?}", titles(&for_bob));
    eyre::ensure!(
        titles(&for_ada) == vec!["Buy milk", "Post letter"],
        "ada sees {:?}",
        titles(&for_ada)
    );
    Ok(())
}
