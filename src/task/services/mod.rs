//! Application services for task lifecycle orchestration.

mod lifecycle;
mod projection;

pub use lifecycle::{
    CreateTaskRequest, MissingReference, ReferenceRepositories, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};
pub use projection::TaskView;
