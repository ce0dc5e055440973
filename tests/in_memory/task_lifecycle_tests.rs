//! In-memory integration tests for task lifecycle operations.

use super::helpers::{TestContext, context};
use rstest::rstest;
use todoapp::task::{
    domain::{CategoryId, TaskId},
    ports::TaskRepository,
    services::{CreateTaskRequest, MissingReference, TaskLifecycleError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_round_trips_through_repository(context: TestContext) -> eyre::Result<()> {
    let owner = context.add_user("ada").await?;
    let category = context.add_category("Errands", owner).await?;
    let urgent = context.add_tag("urgent", owner).await?;
    let home = context.add_tag("home", owner).await?;

    let view = context
        .service
        .create(
            CreateTaskRequest::new("Buy milk", owner, category)
                .with_description("Semi-skimmed")
                .with_tag_ids([home, urgent]),
        )
        .await?;

    let stored = context
        .tasks
        .find_by_id(view.id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should be stored"))?;
    eyre::ensure!(stored.title().as_str() == "Buy milk", "title mismatch");
    eyre::ensure!(stored.description() == Some("Semi-skimmed"), "description mismatch");
    let tag_ids: Vec<_> = stored.tags().iter().map(|tag| tag.id()).collect();
    eyre::ensure!(tag_ids == vec![home, urgent], "tag order mismatch: {tag_ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_creation_leaves_store_empty(context: TestContext) -> eyre::Result<()> {
    let owner = context.add_user("ada").await?;
    let ghost = CategoryId::new(3)?;

    let result = context
        .service
        .create(CreateTaskRequest::new("Buy milk", owner, ghost))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Reference(MissingReference::Category(_)))
        ),
        "expected missing category, got {result:?}"
    );
    eyre::ensure!(context.tasks.is_empty()?, "no task should be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_and_cancel_are_persisted(context: TestContext) -> eyre::Result<()> {
    let owner = context.add_user("ada").await?;
    let category = context.add_category("Errands", owner).await?;
    let view = context.add_task("Buy milk", owner, category).await?;

    context.service.toggle_status(view.id).await?;
    context.service.cancel(view.id).await?;

    let stored = context
        .tasks
        .find_by_id(view.id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should be stored"))?;
    eyre::ensure!(stored.is_done(), "done flag should survive cancellation");
    eyre::ensure!(stored.is_cancelled(), "task should be cancelled");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_all_does_not_reuse_task_ids(context: TestContext) -> eyre::Result<()> {
    let owner = context.add_user("ada").await?;
    let category = context.add_category("Errands", owner).await?;
    let first = context.add_task("Buy milk", owner, category).await?;

    context.tasks.delete_all().await?;
    let second = context.add_task("Buy bread", owner, category).await?;

    eyre::ensure!(context.tasks.len()? == 1, "only the new task should remain");
    eyre::ensure!(second.id > first.id, "ids should keep increasing");
    let gone = context.service.find_by_id(first.id).await?;
    eyre::ensure!(gone.is_none(), "deleted task should not be found");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_task_is_not_found(context: TestContext) -> eyre::Result<()> {
    let result = context.service.toggle_status(TaskId::new(41)?).await;

    eyre::ensure!(
        matches!(result, Err(TaskLifecycleError::NotFound(_))),
        "expected not found, got {result:?}"
    );
    Ok(())
}
