//! Domain model for task lifecycle management.
//!
//! The task domain models task creation against existing users, categories
//! and tags, completion toggling and cancellation, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod location;
mod reference;
mod task;

pub use error::TaskDomainError;
pub use ids::{CategoryId, TagId, TaskId, UserId};
pub use location::Location;
pub use reference::{Category, NewCategory, NewTag, NewUser, Tag, User};
pub use task::{NewTask, PersistedTaskData, Task, TaskTag, TaskTitle};
