//! Translation of failures into HTTP-style responses.
//!
//! Every failure that escapes the task service, the payload validator or
//! anything else on the request path ends up here exactly once.
//!
//! | Failure | Status | Body |
//! |---------|--------|------|
//! | Task not found | 404 | message |
//! | Missing user, category or tag | 400 | message |
//! | Business-rule violation | 400 | message |
//! | Field validation | 400 | list of messages |
//! | Anything else | 500 | `internal server error: <message or type name>` |

use super::payload::FieldErrors;
use crate::task::services::TaskLifecycleError;
use serde::Serialize;
use std::fmt;
use tracing::{debug, error};

const INTERNAL_PREFIX: &str = "internal server error";

/// Status codes produced by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u16")]
pub enum HttpStatus {
    /// 400: the request was malformed or broke a business rule.
    BadRequest,
    /// 404: the target of the operation does not exist.
    NotFound,
    /// 500: an unclassified failure.
    InternalServerError,
}

impl HttpStatus {
    /// Returns the numeric status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    /// Returns the canonical reason phrase.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    /// Returns `true` for 4xx statuses.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::BadRequest | Self::NotFound)
    }
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// Response body: a single message, or one message per rejected field.
///
/// Serialises to a bare JSON string or a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Single failure message.
    Message(String),
    /// Ordered per-field messages.
    Messages(Vec<String>),
}

/// Status and body for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Status code.
    pub status: HttpStatus,
    /// Response body.
    pub body: ErrorBody,
}

impl ErrorResponse {
    /// Builds a 404 response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: HttpStatus::NotFound,
            body: ErrorBody::Message(message.into()),
        }
    }

    /// Builds a 400 response with a single message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: HttpStatus::BadRequest,
            body: ErrorBody::Message(message.into()),
        }
    }

    /// Builds a 400 response listing field messages.
    #[must_use]
    pub const fn invalid_fields(messages: Vec<String>) -> Self {
        Self {
            status: HttpStatus::BadRequest,
            body: ErrorBody::Messages(messages),
        }
    }

    /// Builds a 500 response.
    ///
    /// `type_name` replaces `message` when the latter is blank.
    #[must_use]
    pub fn internal(message: &str, type_name: &str) -> Self {
        let detail = if message.trim().is_empty() {
            type_name
        } else {
            message
        };
        Self {
            status: HttpStatus::InternalServerError,
            body: ErrorBody::Message(format!("{INTERNAL_PREFIX}: {detail}")),
        }
    }

    /// Returns the body as a JSON value for the transport to send.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error if the body cannot be encoded.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.body)
    }
}

/// Any failure that reached the request boundary.
#[derive(Debug)]
pub enum ApiFailure {
    /// Failure raised by the task lifecycle service.
    Lifecycle(TaskLifecycleError),
    /// Payload fields rejected before reaching the service.
    Fields(FieldErrors),
    /// Any other failure, captured with its type name.
    Unexpected {
        /// Unqualified type name of the original error.
        type_name: &'static str,
        /// Display output of the original error.
        message: String,
    },
}

impl ApiFailure {
    /// Captures an unclassified error.
    #[must_use]
    pub fn unexpected<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::Unexpected {
            type_name: short_type_name::<E>(),
            message: err.to_string(),
        }
    }
}

impl From<TaskLifecycleError> for ApiFailure {
    fn from(err: TaskLifecycleError) -> Self {
        Self::Lifecycle(err)
    }
}

impl From<FieldErrors> for ApiFailure {
    fn from(errors: FieldErrors) -> Self {
        Self::Fields(errors)
    }
}

impl From<ApiFailure> for ErrorResponse {
    fn from(failure: ApiFailure) -> Self {
        translate(&failure)
    }
}

/// Maps a failure to its response.
#[must_use]
pub fn translate(failure: &ApiFailure) -> ErrorResponse {
    let response = match failure {
        ApiFailure::Lifecycle(err) => translate_lifecycle(err),
        ApiFailure::Fields(errors) => ErrorResponse::invalid_fields(errors.messages()),
        ApiFailure::Unexpected { type_name, message } => {
            ErrorResponse::internal(message, type_name)
        }
    };

    if response.status.is_client_error() {
        debug!(status = response.status.code(), failure = ?failure, "request rejected");
    } else {
        error!(status = response.status.code(), failure = ?failure, "request failed");
    }
    response
}

fn translate_lifecycle(err: &TaskLifecycleError) -> ErrorResponse {
    match err {
        TaskLifecycleError::NotFound(_) => ErrorResponse::not_found(err.to_string()),
        TaskLifecycleError::Validation(_) | TaskLifecycleError::Reference(_) => {
            ErrorResponse::bad_request(err.to_string())
        }
        TaskLifecycleError::Repository(inner) => {
            ErrorResponse::internal(&inner.to_string(), short_type_name_of(inner))
        }
        TaskLifecycleError::ReferenceRepository(inner) => {
            ErrorResponse::internal(&inner.to_string(), short_type_name_of(inner))
        }
    }
}

fn short_type_name_of<T>(_value: &T) -> &'static str {
    short_type_name::<T>()
}

/// Strips the module path (and any generic arguments) from a type name.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
