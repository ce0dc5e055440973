//! Repository port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its tag associations and returns it
    /// with the storage-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backend rejects
    /// the write.
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task>;

    /// Persists the mutable state of an existing task (completion flag and
    /// cancellation timestamp).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task that has not been cancelled, ordered by identifier.
    async fn find_active(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the given user's tasks that have not been cancelled, ordered
    /// by identifier.
    async fn find_active_by_user(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes every task and tag association.
    async fn delete_all(&self) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
