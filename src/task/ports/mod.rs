//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod reference;
pub mod repository;

pub use reference::{
    CategoryRepository, ReferenceRepositoryError, ReferenceRepositoryResult, TagRepository,
    UserRepository,
};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
