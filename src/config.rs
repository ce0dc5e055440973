//! Runtime configuration.
//!
//! [`TaskRequestLimits`] bounds what a task payload may contain and
//! [`DatabaseConfig`] describes how to reach `PostgreSQL`. Both have
//! defaults suitable for local development.

use crate::task::adapters::postgres::TodoPgPool;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// Size limits applied to task payloads before they reach the service.
///
/// # Examples
///
/// ```
/// use todoapp::config::TaskRequestLimits;
///
/// let limits = TaskRequestLimits::default();
/// assert_eq!(limits.max_title_length, 255);
///
/// let strict = TaskRequestLimits::strict();
/// assert!(strict.max_tags < limits.max_tags);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequestLimits {
    /// Maximum title length in characters.
    pub max_title_length: usize,
    /// Maximum description length in characters.
    pub max_description_length: usize,
    /// Maximum number of tag identifiers per task.
    pub max_tags: usize,
    /// Maximum location name length in characters.
    pub max_location_name_length: usize,
}

impl Default for TaskRequestLimits {
    fn default() -> Self {
        Self {
            max_title_length: 255,
            max_description_length: 2_000,
            max_tags: 32,
            max_location_name_length: 255,
        }
    }
}

impl TaskRequestLimits {
    /// Creates a lenient configuration with generous limits.
    ///
    /// The title and location name limits stay at the column widths of the
    /// `tasks` table.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            max_description_length: 100_000,
            max_tags: 1_000,
            ..Default::default()
        }
    }

    /// Creates a strict configuration with reduced limits.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_title_length: 120,
            max_description_length: 500,
            max_tags: 8,
            max_location_name_length: 120,
        }
    }
}

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable holding the pool size.
pub const DATABASE_MAX_CONNECTIONS_VAR: &str = "DATABASE_MAX_CONNECTIONS";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set or is blank.
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable has an unusable value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Name of the environment variable.
        key: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// The connection pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when `DATABASE_URL` is unset and
    /// [`ConfigError::InvalidValue`] when `DATABASE_MAX_CONNECTIONS` is not
    /// a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// See [`DatabaseConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(DATABASE_URL_VAR))?;

        let max_connections = match lookup(DATABASE_MAX_CONNECTIONS_VAR) {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => parse_pool_size(&raw)?,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }

    /// Builds an r2d2 pool for the Diesel adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the pool cannot establish its
    /// initial connections.
    pub fn build_pool(&self) -> Result<TodoPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .build(manager)?;
        Ok(pool)
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: DATABASE_MAX_CONNECTIONS_VAR,
        message,
    };
    let size = raw
        .trim()
        .parse::<u32>()
        .map_err(|err| invalid(err.to_string()))?;
    if size == 0 {
        return Err(invalid("pool size must be at least 1".to_owned()));
    }
    Ok(size)
}
