//! Task aggregate root and related task lifecycle types.

use super::{CategoryId, Location, Tag, TagId, TaskDomainError, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-blank task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Association between a task and a tag.
///
/// The tag name is captured when the association is loaded so projections
/// can be built without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaskTag {
    id: TagId,
    name: String,
}

impl TaskTag {
    /// Creates an association entry from its parts.
    #[must_use]
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&Tag> for TaskTag {
    fn from(tag: &Tag) -> Self {
        Self::new(tag.id(), tag.name())
    }
}

/// Validated task that has not been persisted yet.
///
/// Storage assigns the identifier and turns the draft into a [`Task`] via
/// [`NewTask::with_id`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<String>,
    user_id: UserId,
    category_id: CategoryId,
    tags: Vec<TaskTag>,
    location: Option<Location>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a draft owned by `user_id` in `category_id`.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        user_id: UserId,
        category_id: CategoryId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            title,
            description: None,
            user_id,
            category_id,
            tags: Vec::new(),
            location: None,
            created_at: clock.utc(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the tag associations, keeping the first occurrence of each tag.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TaskTag>) -> Self {
        let mut unique: Vec<TaskTag> = Vec::new();
        for tag in tags {
            if unique.iter().all(|existing| existing.id() != tag.id()) {
                unique.push(tag);
            }
        }
        self.tags = unique;
        self
    }

    /// Sets the task location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the category.
    #[must_use]
    pub const fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the tag associations in insertion order.
    #[must_use]
    pub fn tags(&self) -> &[TaskTag] {
        &self.tags
    }

    /// Returns the location, if any.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Binds the draft to its storage-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            user_id: self.user_id,
            category_id: self.category_id,
            tags: self.tags,
            done: false,
            canceled_at: None,
            location: self.location,
            created_at: self.created_at,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    user_id: UserId,
    category_id: CategoryId,
    tags: Vec<TaskTag>,
    done: bool,
    canceled_at: Option<DateTime<Utc>>,
    location: Option<Location>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Owning user.
    pub user_id: UserId,
    /// Category the task belongs to.
    pub category_id: CategoryId,
    /// Tag associations in insertion order.
    pub tags: Vec<TaskTag>,
    /// Completion flag.
    pub done: bool,
    /// Cancellation timestamp, if cancelled.
    pub canceled_at: Option<DateTime<Utc>>,
    /// Persisted location, if any.
    pub location: Option<Location>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            user_id: data.user_id,
            category_id: data.category_id,
            tags: data.tags,
            done: data.done,
            canceled_at: data.canceled_at,
            location: data.location,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the category.
    #[must_use]
    pub const fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the tag associations in insertion order.
    #[must_use]
    pub fn tags(&self) -> &[TaskTag] {
        &self.tags
    }

    /// Returns whether the task is marked as done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the cancellation timestamp, if cancelled.
    #[must_use]
    pub const fn canceled_at(&self) -> Option<DateTime<Utc>> {
        self.canceled_at
    }

    /// Returns whether the task has been cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.canceled_at.is_some()
    }

    /// Returns the location, if any.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flips the completion flag and returns the new value.
    ///
    /// Cancelled tasks may still be toggled.
    pub const fn toggle_done(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }

    /// Marks the task as cancelled at the current clock time.
    ///
    /// Returns `false` without touching the stored timestamp when the task
    /// was already cancelled. The completion flag is left as is.
    pub fn cancel(&mut self, clock: &impl Clock) -> bool {
        if self.canceled_at.is_some() {
            return false;
        }
        self.canceled_at = Some(clock.utc());
        true
    }
}
