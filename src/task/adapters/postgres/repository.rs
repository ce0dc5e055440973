//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    blocking::{PersistenceFailure, TodoPgPool, run_blocking},
    models::{NewTaskRow, NewTaskTagRow, TaskRow, TaskTagRow},
    schema::{tags, task_tags, tasks},
};
use crate::task::{
    domain::{
        CategoryId, Location, NewTask, PersistedTaskData, Task, TaskId, TaskTag, TaskTitle, TagId,
        UserId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use std::collections::HashMap;

impl PersistenceFailure for TaskRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TodoPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(&task);
        run_blocking(&self.pool, move |connection| {
            let id = connection
                .transaction::<i64, DieselError, _>(|tx| {
                    let id = diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .returning(tasks::id)
                        .get_result::<i64>(tx)?;
                    let tag_rows = to_tag_rows(id, task.tags());
                    if !tag_rows.is_empty() {
                        diesel::insert_into(task_tags::table)
                            .values(&tag_rows)
                            .execute(tx)?;
                    }
                    Ok(id)
                })
                .map_err(TaskRepositoryError::persistence)?;
            let task_id = TaskId::new(id).map_err(TaskRepositoryError::persistence)?;
            Ok(task.with_id(task_id))
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let done = task.is_done();
        let canceled_at = task.canceled_at();
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.value())))
                .set((tasks::done.eq(done), tasks::canceled_at.eq(canceled_at)))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let mut loaded = attach_tags(connection, rows)?;
            Ok(loaded.pop())
        })
        .await
    }

    async fn find_active(&self) -> TaskRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::canceled_at.is_null())
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            attach_tags(connection, rows)
        })
        .await
    }

    async fn find_active_by_user(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(user_id.value()))
                .filter(tasks::canceled_at.is_null())
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            attach_tags(connection, rows)
        })
        .await
    }

    async fn delete_all(&self) -> TaskRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            connection
                .transaction::<(), DieselError, _>(|tx| {
                    diesel::delete(task_tags::table).execute(tx)?;
                    diesel::delete(tasks::table).execute(tx)?;
                    Ok(())
                })
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Loads tag associations for `rows` in one query and builds aggregates.
fn attach_tags(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<Task>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let tag_rows = task_tags::table
        .inner_join(tags::table)
        .filter(task_tags::task_id.eq_any(ids))
        .order((task_tags::task_id.asc(), task_tags::position.asc()))
        .select((task_tags::task_id, tags::id, tags::name))
        .load::<TaskTagRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;

    let mut grouped = group_tags(tag_rows)?;
    rows.into_iter()
        .map(|row| {
            let associations = grouped.remove(&row.id).unwrap_or_default();
            row_to_task(row, associations)
        })
        .collect()
}

fn group_tags(rows: Vec<TaskTagRow>) -> TaskRepositoryResult<HashMap<i64, Vec<TaskTag>>> {
    let mut grouped: HashMap<i64, Vec<TaskTag>> = HashMap::new();
    for row in rows {
        let tag_id = TagId::new(row.tag_id).map_err(TaskRepositoryError::persistence)?;
        grouped
            .entry(row.task_id)
            .or_default()
            .push(TaskTag::new(tag_id, row.name));
    }
    Ok(grouped)
}

pub(super) fn to_new_row(task: &NewTask) -> NewTaskRow {
    let location = task.location();
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        user_id: task.user_id().value(),
        category_id: task.category_id().value(),
        done: false,
        canceled_at: None,
        location_latitude: location.and_then(Location::latitude),
        location_longitude: location.and_then(Location::longitude),
        location_name: location.and_then(Location::name).map(str::to_owned),
        location_description: location.and_then(Location::description).map(str::to_owned),
        created_at: task.created_at(),
    }
}

pub(super) fn to_tag_rows(task_id: i64, tags: &[TaskTag]) -> Vec<NewTaskTagRow> {
    tags.iter()
        .zip(0_i32..)
        .map(|(tag, position)| NewTaskTagRow {
            task_id,
            tag_id: tag.id().value(),
            position,
        })
        .collect()
}

pub(super) fn row_to_task(row: TaskRow, tags: Vec<TaskTag>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        user_id,
        category_id,
        done,
        canceled_at,
        location_latitude,
        location_longitude,
        location_name,
        location_description,
        created_at,
    } = row;

    let location = row_location(
        location_latitude,
        location_longitude,
        location_name,
        location_description,
    )?;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskRepositoryError::persistence)?,
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        user_id: UserId::new(user_id).map_err(TaskRepositoryError::persistence)?,
        category_id: CategoryId::new(category_id).map_err(TaskRepositoryError::persistence)?,
        tags,
        done,
        canceled_at,
        location,
        created_at,
    };
    Ok(Task::from_persisted(data))
}

fn row_location(
    latitude: Option<f64>,
    longitude: Option<f64>,
    name: Option<String>,
    description: Option<String>,
) -> TaskRepositoryResult<Option<Location>> {
    let mut location =
        Location::new(latitude, longitude).map_err(TaskRepositoryError::persistence)?;
    if let Some(value) = name {
        location = location.with_name(value);
    }
    if let Some(value) = description {
        location = location.with_description(value);
    }
    Ok((!location.is_empty()).then_some(location))
}
