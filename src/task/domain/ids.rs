//! Identifier and validated scalar types for the task domain.
//!
//! Every persisted entity is keyed by a positive integer assigned by
//! storage. Each entity gets its own newtype so a category identifier can
//! never be passed where a user identifier is expected.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`TaskDomainError::InvalidIdentifier`] when the value
            /// is zero or negative.
            pub const fn new(value: i64) -> Result<Self, TaskDomainError> {
                if value <= 0 {
                    return Err(TaskDomainError::InvalidIdentifier {
                        entity: $entity,
                        value,
                    });
                }
                Ok(Self(value))
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TaskDomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(
    /// Unique identifier for a task record.
    TaskId,
    "task"
);

positive_id!(
    /// Unique identifier for a user.
    UserId,
    "user"
);

positive_id!(
    /// Unique identifier for a task category.
    CategoryId,
    "category"
);

positive_id!(
    /// Unique identifier for a tag.
    TagId,
    "tag"
);
