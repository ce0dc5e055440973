//! Optional geographic context attached to a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

const LATITUDE_LIMIT: f64 = 90.0;
const LONGITUDE_LIMIT: f64 = 180.0;

/// Where a task should be carried out.
///
/// All parts are optional; a location may carry only a name, only
/// coordinates, or any combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LocationParts")]
pub struct Location {
    latitude: Option<f64>,
    longitude: Option<f64>,
    name: Option<String>,
    description: Option<String>,
}

/// Unchecked wire shape; deserialised locations pass through [`Location::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationParts {
    latitude: Option<f64>,
    longitude: Option<f64>,
    name: Option<String>,
    description: Option<String>,
}

impl TryFrom<LocationParts> for Location {
    type Error = TaskDomainError;

    fn try_from(parts: LocationParts) -> Result<Self, Self::Error> {
        let checked = Self::new(parts.latitude, parts.longitude)?;
        Ok(Self {
            name: parts.name,
            description: parts.description,
            ..checked
        })
    }
}

impl Location {
    /// Creates a validated location from optional coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCoordinate`] when a coordinate is
    /// not finite or lies outside its range.
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Result<Self, TaskDomainError> {
        if let Some(value) = latitude {
            check_coordinate("latitude", value, LATITUDE_LIMIT)?;
        }
        if let Some(value) = longitude {
            check_coordinate("longitude", value, LONGITUDE_LIMIT)?;
        }
        Ok(Self {
            latitude,
            longitude,
            name: None,
            description: None,
        })
    }

    /// Sets the location name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the free-form location description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the latitude, if any.
    #[must_use]
    pub const fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Returns the longitude, if any.
    #[must_use]
    pub const fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// Returns the location name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the location description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns `true` when no part of the location is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.latitude.is_none()
            && self.longitude.is_none()
            && self.name.is_none()
            && self.description.is_none()
    }
}

fn check_coordinate(axis: &'static str, value: f64, limit: f64) -> Result<(), TaskDomainError> {
    if value.is_finite() && value.abs() <= limit {
        return Ok(());
    }
    Err(TaskDomainError::InvalidCoordinate { axis, value, limit })
}
