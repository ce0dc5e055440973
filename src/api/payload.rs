//! Field-level validation of task creation payloads.
//!
//! Unlike the service, which stops at the first problem, payload
//! validation reports every offending field at once, in field order.

use crate::config::TaskRequestLimits;
use crate::task::{
    domain::{CategoryId, Location, TagId, UserId},
    services::CreateTaskRequest,
};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Raw task creation payload as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    /// Task title; required and non-blank.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user; required.
    pub user_id: Option<i64>,
    /// Category; required.
    pub category_id: Option<i64>,
    /// Tags to attach, in display order.
    pub tag_ids: Option<Vec<i64>>,
    /// Optional location.
    pub location: Option<LocationPayload>,
}

/// Raw location as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Place name.
    pub location_name: Option<String>,
    /// Free-form place description.
    pub location_description: Option<String>,
}

/// One rejected payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Payload field name as the client spells it.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field error found in a payload, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid task payload: {}", format_errors(.0))]
pub struct FieldErrors(Vec<FieldError>);

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl FieldErrors {
    /// Records an error for `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns `true` when no error was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the recorded errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the messages alone, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|error| error.message.clone()).collect()
    }
}

impl TaskPayload {
    /// Validates every field and builds a service request.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] listing each rejected field when any check
    /// fails.
    pub fn validate(self, limits: &TaskRequestLimits) -> Result<CreateTaskRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = check_title(self.title, limits, &mut errors);
        check_description(self.description.as_deref(), limits, &mut errors);
        let user_id = check_required_id(self.user_id, "userId", UserId::new, &mut errors);
        let category_id =
            check_required_id(self.category_id, "categoryId", CategoryId::new, &mut errors);
        let tag_ids = check_tag_ids(self.tag_ids.unwrap_or_default(), limits, &mut errors);
        let location = check_location(self.location, limits, &mut errors);

        let (Some(task_title), Some(user), Some(category), Some(tags), Some(place)) =
            (title, user_id, category_id, tag_ids, location)
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut request = CreateTaskRequest::new(task_title, user, category).with_tag_ids(tags);
        if let Some(text) = self.description {
            request = request.with_description(text);
        }
        if let Some(value) = place {
            request = request.with_location(value);
        }
        Ok(request)
    }
}

fn check_title(
    title: Option<String>,
    limits: &TaskRequestLimits,
    errors: &mut FieldErrors,
) -> Option<String> {
    let Some(value) = title.filter(|text| !text.trim().is_empty()) else {
        errors.push("title", "title must not be blank");
        return None;
    };
    if value.trim().chars().count() > limits.max_title_length {
        errors.push(
            "title",
            format!(
                "title must be at most {} characters",
                limits.max_title_length
            ),
        );
        return None;
    }
    Some(value)
}

fn check_description(
    description: Option<&str>,
    limits: &TaskRequestLimits,
    errors: &mut FieldErrors,
) {
    if description.is_some_and(|text| text.chars().count() > limits.max_description_length) {
        errors.push(
            "description",
            format!(
                "description must be at most {} characters",
                limits.max_description_length
            ),
        );
    }
}

fn check_required_id<T, E>(
    value: Option<i64>,
    field: &'static str,
    make: impl FnOnce(i64) -> Result<T, E>,
    errors: &mut FieldErrors,
) -> Option<T> {
    let Some(raw) = value else {
        errors.push(field, format!("{field} is required"));
        return None;
    };
    let id = make(raw).ok();
    if id.is_none() {
        errors.push(field, format!("{field} must be a positive integer"));
    }
    id
}

fn check_tag_ids(
    raw: Vec<i64>,
    limits: &TaskRequestLimits,
    errors: &mut FieldErrors,
) -> Option<Vec<TagId>> {
    if raw.len() > limits.max_tags {
        errors.push(
            "tagIds",
            format!("tagIds must contain at most {} entries", limits.max_tags),
        );
        return None;
    }
    let parsed: Option<Vec<TagId>> = raw.into_iter().map(|id| TagId::new(id).ok()).collect();
    if parsed.is_none() {
        errors.push("tagIds", "tagIds must contain only positive integers");
    }
    parsed
}

fn check_location(
    payload: Option<LocationPayload>,
    limits: &TaskRequestLimits,
    errors: &mut FieldErrors,
) -> Option<Option<Location>> {
    let Some(raw) = payload else {
        return Some(None);
    };
    if raw
        .location_name
        .as_deref()
        .is_some_and(|name| name.chars().count() > limits.max_location_name_length)
    {
        errors.push(
            "location",
            format!(
                "locationName must be at most {} characters",
                limits.max_location_name_length
            ),
        );
        return None;
    }
    match Location::new(raw.latitude, raw.longitude) {
        Ok(mut location) => {
            if let Some(name) = raw.location_name {
                location = location.with_name(name);
            }
            if let Some(description) = raw.location_description {
                location = location.with_description(description);
            }
            Some((!location.is_empty()).then_some(location))
        }
        Err(err) => {
            errors.push("location", err.to_string());
            None
        }
    }
}
