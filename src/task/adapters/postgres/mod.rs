//! `PostgreSQL` adapters for task lifecycle persistence.
//!
//! Schema lives in `migrations/`; apply it before constructing the
//! repositories.

mod blocking;
mod models;
mod reference;
mod repository;
mod schema;

pub use blocking::TodoPgPool;
pub use reference::{PostgresCategoryRepository, PostgresTagRepository, PostgresUserRepository};
pub use repository::PostgresTaskRepository;
