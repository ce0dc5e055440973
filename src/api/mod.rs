//! Boundary between the task service and an HTTP transport.
//!
//! [`payload`] checks raw request fields before they reach the service and
//! [`error`] turns every failure into a status code and body. Routing and
//! serialisation of successful responses belong to the transport.

pub mod error;
pub mod payload;

pub use error::{ApiFailure, ErrorBody, ErrorResponse, HttpStatus, translate};
pub use payload::{FieldError, FieldErrors, LocationPayload, TaskPayload};

#[cfg(test)]
mod tests;
