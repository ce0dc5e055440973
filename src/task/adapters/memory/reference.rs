//! In-memory repositories for users, categories and tags.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{
        Category, CategoryId, NewCategory, NewTag, NewUser, Tag, TagId, TaskDomainError, User,
        UserId,
    },
    ports::{
        CategoryRepository, ReferenceRepositoryError, ReferenceRepositoryResult, TagRepository,
        UserRepository,
    },
};

/// Rows keyed by their raw identifier plus the identifier sequence.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

fn poisoned(message: String) -> ReferenceRepositoryError {
    ReferenceRepositoryError::persistence(std::io::Error::other(message))
}

fn read<T>(state: &RwLock<Table<T>>) -> ReferenceRepositoryResult<RwLockReadGuard<'_, Table<T>>> {
    state.read().map_err(|err| poisoned(err.to_string()))
}

fn write<T>(
    state: &RwLock<Table<T>>,
) -> ReferenceRepositoryResult<RwLockWriteGuard<'_, Table<T>>> {
    state.write().map_err(|err| poisoned(err.to_string()))
}

fn insert_row<T, I>(
    state: &RwLock<Table<T>>,
    make_id: impl FnOnce(i64) -> Result<I, TaskDomainError>,
    build: impl FnOnce(I) -> T,
) -> ReferenceRepositoryResult<T>
where
    T: Clone,
{
    let mut table = write(state)?;
    let next_id = table.last_id.saturating_add(1);
    let id = make_id(next_id).map_err(ReferenceRepositoryError::persistence)?;
    table.last_id = next_id;
    let row = build(id);
    table.rows.insert(next_id, row.clone());
    Ok(row)
}

fn find_row<T: Clone>(state: &RwLock<Table<T>>, id: i64) -> ReferenceRepositoryResult<Option<T>> {
    Ok(read(state)?.rows.get(&id).cloned())
}

fn clear<T>(state: &RwLock<Table<T>>) -> ReferenceRepositoryResult<()> {
    write(state)?.rows.clear();
    Ok(())
}

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<Table<User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> ReferenceRepositoryResult<User> {
        insert_row(&self.state, UserId::new, |id| user.with_id(id))
    }

    async fn find_by_id(&self, id: UserId) -> ReferenceRepositoryResult<Option<User>> {
        find_row(&self.state, id.value())
    }

    async fn delete_all(&self) -> ReferenceRepositoryResult<()> {
        clear(&self.state)
    }
}

/// Thread-safe in-memory category repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    state: Arc<RwLock<Table<Category>>>,
}

impl InMemoryCategoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, category: NewCategory) -> ReferenceRepositoryResult<Category> {
        insert_row(&self.state, CategoryId::new, |id| category.with_id(id))
    }

    async fn find_by_id(&self, id: CategoryId) -> ReferenceRepositoryResult<Option<Category>> {
        find_row(&self.state, id.value())
    }

    async fn delete_all(&self) -> ReferenceRepositoryResult<()> {
        clear(&self.state)
    }
}

/// Thread-safe in-memory tag repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagRepository {
    state: Arc<RwLock<Table<Tag>>>,
}

impl InMemoryTagRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn insert(&self, tag: NewTag) -> ReferenceRepositoryResult<Tag> {
        insert_row(&self.state, TagId::new, |id| tag.with_id(id))
    }

    async fn find_by_id(&self, id: TagId) -> ReferenceRepositoryResult<Option<Tag>> {
        find_row(&self.state, id.value())
    }

    async fn delete_all(&self) -> ReferenceRepositoryResult<()> {
        clear(&self.state)
    }
}
