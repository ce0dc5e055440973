//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("title must not be blank")]
    EmptyTitle,

    /// A referenced entity name is empty after trimming.
    #[error("{entity} name must not be blank")]
    EmptyName {
        /// Entity kind whose name was blank.
        entity: &'static str,
    },

    /// An identifier is zero or negative.
    #[error("invalid {entity} identifier {value}, expected a positive integer")]
    InvalidIdentifier {
        /// Entity kind the identifier belongs to.
        entity: &'static str,
        /// Rejected raw value.
        value: i64,
    },

    /// A location coordinate is not finite or outside its valid range.
    #[error("{axis} {value} is outside the range -{limit}..={limit}")]
    InvalidCoordinate {
        /// Coordinate axis, `latitude` or `longitude`.
        axis: &'static str,
        /// Rejected raw value.
        value: f64,
        /// Absolute bound for the axis.
        limit: f64,
    },
}
