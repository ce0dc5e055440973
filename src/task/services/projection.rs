//! Externally visible read shape of a task.

use crate::task::domain::{CategoryId, Location, Task, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Projection of a task returned by the lifecycle service.
///
/// Tag names appear in the order the tags were supplied at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user.
    pub user_id: UserId,
    /// Category the task belongs to.
    pub category_id: CategoryId,
    /// Whether the task is marked as done.
    pub done: bool,
    /// When the task was cancelled, if it was.
    pub canceled_at: Option<DateTime<Utc>>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// Names of the associated tags.
    pub tags: Vec<String>,
    /// Optional location.
    pub location: Option<Location>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            user_id: task.user_id(),
            category_id: task.category_id(),
            done: task.is_done(),
            canceled_at: task.canceled_at(),
            created_at: task.created_at(),
            tags: task.tags().iter().map(|tag| tag.name().to_owned()).collect(),
            location: task.location().cloned(),
        }
    }
}
