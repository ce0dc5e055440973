//! Service layer for task creation, lookup, completion and cancellation.

use super::TaskView;
use crate::task::{
    domain::{
        CategoryId, Location, NewTask, TagId, Task, TaskDomainError, TaskId, TaskTag, TaskTitle,
        UserId,
    },
    ports::{
        CategoryRepository, ReferenceRepositoryError, TagRepository, TaskRepository,
        TaskRepositoryError, UserRepository,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    user_id: UserId,
    category_id: CategoryId,
    tag_ids: Vec<TagId>,
    location: Option<Location>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, user_id: UserId, category_id: CategoryId) -> Self {
        Self {
            title: title.into(),
            description: None,
            user_id,
            category_id,
            tag_ids: Vec::new(),
            location: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the tags to associate, in display order.
    #[must_use]
    pub fn with_tag_ids(mut self, tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }

    /// Sets the task location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// A referenced entity that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingReference {
    /// No user with the identifier exists.
    #[error("user not found: {0}")]
    User(UserId),
    /// No category with the identifier exists.
    #[error("category not found: {0}")]
    Category(CategoryId),
    /// No tag with the identifier exists.
    #[error("tag not found: {0}")]
    Tag(TagId),
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// The request referenced a user, category or tag that does not exist.
    #[error(transparent)]
    Reference(#[from] MissingReference),
    /// The task the operation targets does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
    /// Reference repository operation failed.
    #[error(transparent)]
    ReferenceRepository(#[from] ReferenceRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ TaskRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Lookup ports for the entities a task references.
#[derive(Clone)]
pub struct ReferenceRepositories {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl ReferenceRepositories {
    /// Bundles the user, category and tag repositories.
    #[must_use]
    pub const fn new(
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            users,
            categories,
            tags,
        }
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    references: ReferenceRepositories,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, references: ReferenceRepositories, clock: Arc<C>) -> Self {
        Self {
            repository,
            references,
            clock,
        }
    }

    /// Creates a task after checking that everything it references exists.
    ///
    /// Checks run in a fixed order and stop at the first failure: title,
    /// user, category, then each tag in the order supplied. Nothing is
    /// written unless every check passes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for a blank title,
    /// [`TaskLifecycleError::Reference`] for a missing user, category or tag,
    /// or a repository error when storage fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<TaskView> {
        let CreateTaskRequest {
            title,
            description,
            user_id,
            category_id,
            tag_ids,
            location,
        } = request;

        let task_title = TaskTitle::new(title)?;
        self.require_user(user_id).await?;
        self.require_category(category_id).await?;
        let tags = self.resolve_tags(&tag_ids).await?;

        let mut draft =
            NewTask::new(task_title, user_id, category_id, &*self.clock).with_tags(tags);
        if let Some(text) = description {
            draft = draft.with_description(text);
        }
        if let Some(place) = location {
            draft = draft.with_location(place);
        }

        let task = self.repository.insert(draft).await?;
        info!(task_id = %task.id(), %user_id, %category_id, "task created");
        Ok(TaskView::from(&task))
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<TaskView>> {
        let found = self.repository.find_by_id(id).await?;
        debug!(task_id = %id, found = found.is_some(), "task lookup");
        Ok(found.as_ref().map(TaskView::from))
    }

    /// Flips the completion flag of a task.
    ///
    /// Cancelled tasks may still be toggled.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn toggle_status(&self, id: TaskId) -> TaskLifecycleResult<TaskView> {
        let mut task = self.load(id).await?;
        let done = task.toggle_done();
        self.repository.update(&task).await?;
        debug!(task_id = %id, done, "task status toggled");
        Ok(TaskView::from(&task))
    }

    /// Cancels a task, stamping the current time.
    ///
    /// Cancelling an already-cancelled task is a no-op that keeps the
    /// original timestamp. The completion flag is never changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn cancel(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let mut task = self.load(id).await?;
        if !task.cancel(&*self.clock) {
            debug!(task_id = %id, "task already cancelled");
            return Ok(());
        }
        self.repository.update(&task).await?;
        info!(task_id = %id, "task cancelled");
        Ok(())
    }

    /// Lists every task that has not been cancelled, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_active(&self) -> TaskLifecycleResult<Vec<TaskView>> {
        let tasks = self.repository.find_active().await?;
        Ok(tasks.iter().map(TaskView::from).collect())
    }

    /// Lists a user's tasks that have not been cancelled, ordered by
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Reference`] when the user does not
    /// exist.
    pub async fn list_active_for_user(&self, user_id: UserId) -> TaskLifecycleResult<Vec<TaskView>> {
        self.require_user(user_id).await?;
        let tasks = self.repository.find_active_by_user(user_id).await?;
        Ok(tasks.iter().map(TaskView::from).collect())
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    async fn require_user(&self, id: UserId) -> TaskLifecycleResult<()> {
        if self.references.users.find_by_id(id).await?.is_none() {
            return Err(rejected(MissingReference::User(id)));
        }
        Ok(())
    }

    async fn require_category(&self, id: CategoryId) -> TaskLifecycleResult<()> {
        if self.references.categories.find_by_id(id).await?.is_none() {
            return Err(rejected(MissingReference::Category(id)));
        }
        Ok(())
    }

    async fn resolve_tags(&self, ids: &[TagId]) -> TaskLifecycleResult<Vec<TaskTag>> {
        let mut resolved = Vec::with_capacity(ids.len());
        for &id in ids {
            let tag = self
                .references
                .tags
                .find_by_id(id)
                .await?
                .ok_or_else(|| rejected(MissingReference::Tag(id)))?;
            resolved.push(TaskTag::from(&tag));
        }
        Ok(resolved)
    }
}

fn rejected(missing: MissingReference) -> TaskLifecycleError {
    warn!(reference = %missing, "task request rejected");
    TaskLifecycleError::Reference(missing)
}
