//! Entities referenced by tasks.
//!
//! Users, categories and tags have their own lifecycle outside this crate.
//! The task domain only reads them to validate references, so the types
//! here carry the minimum needed for that and for seeding storage.

use super::{CategoryId, TagId, TaskDomainError, UserId};
use serde::Serialize;

fn non_blank(entity: &'static str, value: String) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyName { entity });
    }
    Ok(trimmed.to_owned())
}

/// Account that owns categories, tags and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Unsaved user awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Creates a validated user draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyName`] when the name or email is
    /// blank.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            name: non_blank("user", name.into())?,
            email: non_blank("user email", email.into())?,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Binds the draft to its storage-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Grouping a task must belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    user_id: UserId,
}

impl Category {
    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Unsaved category awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    name: String,
    user_id: UserId,
}

impl NewCategory {
    /// Creates a validated category draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyName`] when the name is blank.
    pub fn new(name: impl Into<String>, user_id: UserId) -> Result<Self, TaskDomainError> {
        Ok(Self {
            name: non_blank("category", name.into())?,
            user_id,
        })
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Binds the draft to its storage-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            user_id: self.user_id,
        }
    }
}

/// Free-form label attachable to many tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    id: TagId,
    name: String,
    user_id: UserId,
}

impl Tag {
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

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Unsaved tag awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    name: String,
    user_id: UserId,
}

impl NewTag {
    /// Creates a validated tag draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyName`] when the name is blank.
    pub fn new(name: impl Into<String>, user_id: UserId) -> Result<Self, TaskDomainError> {
        Ok(Self {
            name: non_blank("tag", name.into())?,
            user_id,
        })
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Binds the draft to its storage-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: TagId) -> Tag {
        Tag {
            id,
            name: self.name,
            user_id: self.user_id,
        }
    }
}
