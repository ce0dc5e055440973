//! Todoapp: personal task-management backend core.
//!
//! Users own categories, tags and tasks. This crate provides the task
//! lifecycle (creation validated against existing references, completion
//! toggling, cancellation) and the boundary translation of failures into
//! HTTP-style responses.
//!
//! # Architecture
//!
//! Todoapp follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle domain, ports, adapters and services
//! - [`api`]: Request payload validation and error translation
//! - [`config`]: Request limits and database settings
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod config;
pub mod task;
pub mod telemetry;
