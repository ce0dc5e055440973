//! Repository ports for the entities tasks reference.
//!
//! Users, categories and tags are owned elsewhere; the task service only
//! needs to look them up. Insertion and bulk deletion exist so adapters can
//! be seeded and reset.

use crate::task::domain::{
    Category, CategoryId, NewCategory, NewTag, NewUser, Tag, TagId, User, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reference repository operations.
pub type ReferenceRepositoryResult<T> = Result<T, ReferenceRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns it with its assigned identifier.
    async fn insert(&self, user: NewUser) -> ReferenceRepositoryResult<User>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> ReferenceRepositoryResult<Option<User>>;

    /// Removes every user.
    async fn delete_all(&self) -> ReferenceRepositoryResult<()>;
}

/// Category persistence contract.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Stores a new category and returns it with its assigned identifier.
    async fn insert(&self, category: NewCategory) -> ReferenceRepositoryResult<Category>;

    /// Finds a category by identifier.
    async fn find_by_id(&self, id: CategoryId) -> ReferenceRepositoryResult<Option<Category>>;

    /// Removes every category.
    async fn delete_all(&self) -> ReferenceRepositoryResult<()>;
}

/// Tag persistence contract.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stores a new tag and returns it with its assigned identifier.
    async fn insert(&self, tag: NewTag) -> ReferenceRepositoryResult<Tag>;

    /// Finds a tag by identifier.
    async fn find_by_id(&self, id: TagId) -> ReferenceRepositoryResult<Option<Tag>>;

    /// Removes every tag.
    async fn delete_all(&self) -> ReferenceRepositoryResult<()>;
}

/// Errors returned by reference repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReferenceRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReferenceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
