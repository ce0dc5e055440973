//! Diesel row models for task persistence.

use super::schema::{categories, tags, task_tags, tasks, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user.
    pub user_id: i64,
    /// Category the task belongs to.
    pub category_id: i64,
    /// Completion flag.
    pub done: bool,
    /// Cancellation timestamp.
    pub canceled_at: Option<DateTime<Utc>>,
    /// Optional location latitude.
    pub location_latitude: Option<f64>,
    /// Optional location longitude.
    pub location_longitude: Option<f64>,
    /// Optional location name.
    pub location_name: Option<String>,
    /// Optional location description.
    pub location_description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records; the identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user.
    pub user_id: i64,
    /// Category the task belongs to.
    pub category_id: i64,
    /// Completion flag.
    pub done: bool,
    /// Cancellation timestamp.
    pub canceled_at: Option<DateTime<Utc>>,
    /// Optional location latitude.
    pub location_latitude: Option<f64>,
    /// Optional location longitude.
    pub location_longitude: Option<f64>,
    /// Optional location name.
    pub location_name: Option<String>,
    /// Optional location description.
    pub location_description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task-to-tag associations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_tags)]
pub struct NewTaskTagRow {
    /// Associated task.
    pub task_id: i64,
    /// Associated tag.
    pub tag_id: i64,
    /// Position within the task's tag list.
    pub position: i32,
}

/// Tag association joined with the tag name.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct TaskTagRow {
    /// Associated task.
    pub task_id: i64,
    /// Associated tag.
    pub tag_id: i64,
    /// Tag name at read time.
    pub name: String,
}

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Insert model for users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Query result row for categories and tags, which share a shape.
#[derive(Debug, Clone, Queryable)]
pub struct OwnedNameRow {
    /// Entity identifier.
    pub id: i64,
    /// Entity name.
    pub name: String,
    /// Owning user.
    pub user_id: i64,
}

/// Insert model for categories.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow {
    /// Category name.
    pub name: String,
    /// Owning user.
    pub user_id: i64,
}

/// Insert model for tags.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub struct NewTagRow {
    /// Tag name.
    pub name: String,
    /// Owning user.
    pub user_id: i64,
}
