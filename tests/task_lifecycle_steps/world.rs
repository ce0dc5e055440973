//! Shared world state for task lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use todoapp::task::{
    adapters::memory::{
        InMemoryCategoryRepository, InMemoryTagRepository, InMemoryTaskRepository,
        InMemoryUserRepository,
    },
    domain::{CategoryId, TagId, UserId},
    services::{
        ReferenceRepositories, TaskLifecycleError, TaskLifecycleService, TaskView,
    },
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestTaskService,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub tags: Arc<InMemoryTagRepository>,
    pub user_id: Option<UserId>,
    pub category_id: Option<CategoryId>,
    pub tag_ids: HashMap<String, TagId>,
    pub last_task: Option<TaskView>,
    pub first_cancelled_at: Option<DateTime<Utc>>,
    pub last_error: Option<TaskLifecycleError>,
}

impl TaskLifecycleWorld {
    /// Creates a world backed by empty in-memory repositories.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let tags = Arc::new(InMemoryTagRepository::new());
        let references =
            ReferenceRepositories::new(users.clone(), categories.clone(), tags.clone());
        let service =
            TaskLifecycleService::new(tasks.clone(), references, Arc::new(DefaultClock));

        Self {
            service,
            tasks,
            users,
            categories,
            tags,
            user_id: None,
            category_id: None,
            tag_ids: HashMap::new(),
            last_task: None,
            first_cancelled_at: None,
            last_error: None,
        }
    }

    /// Returns the seeded user and category.
    ///
    /// # Errors
    ///
    /// Returns an error when no user and category were seeded.
    pub fn owner(&self) -> eyre::Result<(UserId, CategoryId)> {
        let user = self
            .user_id
            .ok_or_else(|| eyre::eyre!("missing user in scenario world"))?;
        let category = self
            .category_id
            .ok_or_else(|| eyre::eyre!("missing category in scenario world"))?;
        Ok((user, category))
    }

    /// Returns the most recently created or updated task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created.
    pub fn task(&self) -> eyre::Result<&TaskView> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Looks up a seeded tag by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the tag was not seeded.
    pub fn tag(&self, name: &str) -> eyre::Result<TagId> {
        self.tag_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("tag {name:?} was not seeded"))
    }

    /// Re-reads the current task from the service.
    ///
    /// # Errors
    ///
    /// Returns an error when no task exists or the lookup fails.
    pub fn reload(&mut self) -> eyre::Result<&TaskView> {
        let id = self.task()?.id;
        let found = run_async(self.service.find_by_id(id))?
            .ok_or_else(|| eyre::eyre!("task {id} disappeared"))?;
        Ok(self.last_task.insert(found))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
