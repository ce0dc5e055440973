//! `PostgreSQL` repositories for users, categories and tags.

use super::{
    blocking::{PersistenceFailure, TodoPgPool, run_blocking},
    models::{NewCategoryRow, NewTagRow, NewUserRow, OwnedNameRow, UserRow},
    schema::{categories, tags, users},
};
use crate::task::{
    domain::{
        Category, CategoryId, NewCategory, NewTag, NewUser, Tag, TagId, User, UserId,
    },
    ports::{
        CategoryRepository, ReferenceRepositoryError, ReferenceRepositoryResult, TagRepository,
        UserRepository,
    },
};
use async_trait::async_trait;
use diesel::prelude::*;

impl PersistenceFailure for ReferenceRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: TodoPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: NewUser) -> ReferenceRepositoryResult<User> {
        let row = NewUserRow {
            name: user.name().to_owned(),
            email: user.email().to_owned(),
        };
        run_blocking(&self.pool, move |connection| {
            let id = diesel::insert_into(users::table)
                .values(&row)
                .returning(users::id)
                .get_result::<i64>(connection)
                .map_err(ReferenceRepositoryError::persistence)?;
            let user_id = UserId::new(id).map_err(ReferenceRepositoryError::persistence)?;
            Ok(user.with_id(user_id))
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> ReferenceRepositoryResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::id.eq(id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(ReferenceRepositoryError::persistence)?;
            row.map(user_from_row).transpose()
        })
        .await
    }

    async fn delete_all(&self) -> ReferenceRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            diesel::delete(users::table)
                .execute(connection)
                .map(drop)
                .map_err(ReferenceRepositoryError::persistence)
        })
        .await
    }
}

/// `PostgreSQL`-backed category repository.
#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pool: TodoPgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, category: NewCategory) -> ReferenceRepositoryResult<Category> {
        let row = NewCategoryRow {
            name: category.name().to_owned(),
            user_id: category.user_id().value(),
        };
        run_blocking(&self.pool, move |connection| {
            let id = diesel::insert_into(categories::table)
                .values(&row)
                .returning(categories::id)
                .get_result::<i64>(connection)
                .map_err(ReferenceRepositoryError::persistence)?;
            let category_id =
                CategoryId::new(id).map_err(ReferenceRepositoryError::persistence)?;
            Ok(category.with_id(category_id))
        })
        .await
    }

    async fn find_by_id(&self, id: CategoryId) -> ReferenceRepositoryResult<Option<Category>> {
        run_blocking(&self.pool, move |connection| {
            let row = categories::table
                .filter(categories::id.eq(id.value()))
                .select((categories::id, categories::name, categories::user_id))
                .first::<OwnedNameRow>(connection)
                .optional()
                .map_err(ReferenceRepositoryError::persistence)?;
            row.map(category_from_row).transpose()
        })
        .await
    }

    async fn delete_all(&self) -> ReferenceRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            diesel::delete(categories::table)
                .execute(connection)
                .map(drop)
                .map_err(ReferenceRepositoryError::persistence)
        })
        .await
    }
}

/// `PostgreSQL`-backed tag repository.
#[derive(Debug, Clone)]
pub struct PostgresTagRepository {
    pool: TodoPgPool,
}

impl PostgresTagRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn insert(&self, tag: NewTag) -> ReferenceRepositoryResult<Tag> {
        let row = NewTagRow {
            name: tag.name().to_owned(),
            user_id: tag.user_id().value(),
        };
        run_blocking(&self.pool, move |connection| {
            let id = diesel::insert_into(tags::table)
                .values(&row)
                .returning(tags::id)
                .get_result::<i64>(connection)
                .map_err(ReferenceRepositoryError::persistence)?;
            let tag_id = TagId::new(id).map_err(ReferenceRepositoryError::persistence)?;
            Ok(tag.with_id(tag_id))
        })
        .await
    }

    async fn find_by_id(&self, id: TagId) -> ReferenceRepositoryResult<Option<Tag>> {
        run_blocking(&self.pool, move |connection| {
            let row = tags::table
                .filter(tags::id.eq(id.value()))
                .select((tags::id, tags::name, tags::user_id))
                .first::<OwnedNameRow>(connection)
                .optional()
                .map_err(ReferenceRepositoryError::persistence)?;
            row.map(tag_from_row).transpose()
        })
        .await
    }

    async fn delete_all(&self) -> ReferenceRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            diesel::delete(tags::table)
                .execute(connection)
                .map(drop)
                .map_err(ReferenceRepositoryError::persistence)
        })
        .await
    }
}

pub(super) fn user_from_row(row: UserRow) -> ReferenceRepositoryResult<User> {
    let id = UserId::new(row.id).map_err(ReferenceRepositoryError::persistence)?;
    NewUser::new(row.name, row.email)
        .map(|draft| draft.with_id(id))
        .map_err(ReferenceRepositoryError::persistence)
}

pub(super) fn category_from_row(row: OwnedNameRow) -> ReferenceRepositoryResult<Category> {
    let id = CategoryId::new(row.id).map_err(ReferenceRepositoryError::persistence)?;
    let owner = UserId::new(row.user_id).map_err(ReferenceRepositoryError::persistence)?;
    NewCategory::new(row.name, owner)
        .map(|draft| draft.with_id(id))
        .map_err(ReferenceRepositoryError::persistence)
}

pub(super) fn tag_from_row(row: OwnedNameRow) -> ReferenceRepositoryResult<Tag> {
    let id = TagId::new(row.id).map_err(ReferenceRepositoryError::persistence)?;
    let owner = UserId::new(row.user_id).map_err(ReferenceRepositoryError::persistence)?;
    NewTag::new(row.name, owner)
        .map(|draft| draft.with_id(id))
        .map_err(ReferenceRepositoryError::persistence)
}
