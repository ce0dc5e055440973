//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todoapp::task::{
    adapters::memory::{
        InMemoryCategoryRepository, InMemoryTagRepository, InMemoryTaskRepository,
        InMemoryUserRepository,
    },
    domain::{CategoryId, NewCategory, NewTag, NewUser, TagId, UserId},
    ports::{CategoryRepository, TagRepository, UserRepository},
    services::{CreateTaskRequest, ReferenceRepositories, TaskLifecycleService, TaskView},
};

/// Service type wired to in-memory adapters.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Service plus direct handles on every repository behind it.
pub struct TestContext {
    pub service: TestService,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub tags: Arc<InMemoryTagRepository>,
}

impl TestContext {
    /// Stores a user named `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is invalid or cannot be stored.
    pub async fn add_user(&self, name: &str) -> eyre::Result<UserId> {
        let user = self
            .users
            .insert(NewUser::new(name, format!("{name}@example.com"))?)
            .await?;
        Ok(user.id())
    }

    /// Stores a category owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is invalid or cannot be stored.
    pub async fn add_category(&self, name: &str, owner: UserId) -> eyre::Result<CategoryId> {
        let category = self
            .categories
            .insert(NewCategory::new(name, owner)?)
            .await?;
        Ok(category.id())
    }

    /// Stores a tag owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is invalid or cannot be stored.
    pub async fn add_tag(&self, name: &str, owner: UserId) -> eyre::Result<TagId> {
        let tag = self.tags.insert(NewTag::new(name, owner)?).await?;
        Ok(tag.id())
    }

    /// Creates a plain task titled `title` through the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request.
    pub async fn add_task(
        &self,
        title: &str,
        user: UserId,
        category: CategoryId,
    ) -> eyre::Result<TaskView> {
        let view = self
            .service
            .create(CreateTaskRequest::new(title, user, category))
            .await?;
        Ok(view)
    }
}

/// Provides a service over fresh, empty in-memory repositories.
#[fixture]
pub fn context() -> TestContext {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let categories = Arc::new(InMemoryCategoryRepository::new());
    let tags = Arc::new(InMemoryTagRepository::new());
    let references = ReferenceRepositories::new(users.clone(), categories.clone(), tags.clone());

    TestContext {
        service: TaskLifecycleService::new(tasks.clone(), references, Arc::new(DefaultClock)),
        tasks,
        users,
        categories,
        tags,
    }
}
