//! In-memory adapters for tests and embedding.

mod reference;
mod task;

pub use reference::{InMemoryCategoryRepository, InMemoryTagRepository, InMemoryUserRepository};
pub use task::InMemoryTaskRepository;
