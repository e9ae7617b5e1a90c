//! Environment-driven server configuration.
//!
//! Recognised variables:
//!
//! - `TASKBOARD_BIND_ADDR`: socket address to listen on (default `127.0.0.1:8080`)
//! - `DATABASE_URL`: `PostgreSQL` URL; the in-memory store is used when unset
//! - `TASKBOARD_DB_POOL_SIZE`: maximum pooled connections (default 8)
//! - `TASKBOARD_STORE_TIMEOUT_MS`: per-call storage budget (default 5000)
//! - `TASKBOARD_LOG_FORMAT`: `pretty` or `json` (default `pretty`)
//! - `TASKBOARD_USERS`: comma-separated user identifiers seeded into the
//!   in-memory user directory

use crate::board::services::{BoardServiceConfig, DEFAULT_STORE_TIMEOUT};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_POOL_SIZE: u32 = 8;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Configuration errors reported at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is present but cannot be parsed.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// `PostgreSQL` URL, if any.
    pub database_url: Option<String>,
    /// Connection pool size.
    pub db_pool_size: u32,
    /// Budget for each storage or directory call.
    pub store_timeout: Duration,
    /// Log output format.
    pub log_format: LogFormat,
    /// Users known to the in-memory directory.
    pub seed_users: Vec<String>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for any variable that is set but
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which returns a variable's value
    /// when it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for any variable that is set but
    /// malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = parse_or(
            "TASKBOARD_BIND_ADDR",
            get("TASKBOARD_BIND_ADDR")
                .as_deref()
                .unwrap_or(DEFAULT_BIND_ADDR),
        )?;
        let db_pool_size = match get("TASKBOARD_DB_POOL_SIZE") {
            Some(raw) => parse_or("TASKBOARD_DB_POOL_SIZE", &raw)?,
            None => DEFAULT_POOL_SIZE,
        };
        if db_pool_size == 0 {
            return Err(invalid("TASKBOARD_DB_POOL_SIZE", "0", "must be at least 1"));
        }
        let store_timeout = match get("TASKBOARD_STORE_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_or("TASKBOARD_STORE_TIMEOUT_MS", &raw)?),
            None => DEFAULT_STORE_TIMEOUT,
        };
        let log_format = match get("TASKBOARD_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(invalid(
                    "TASKBOARD_LOG_FORMAT",
                    other,
                    "expected pretty or json",
                ));
            }
        };
        let seed_users = get("TASKBOARD_USERS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|user| !user.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            db_pool_size,
            store_timeout,
            log_format,
            seed_users,
        })
    }

    /// Service tunables derived from this configuration.
    #[must_use]
    pub const fn service_config(&self) -> BoardServiceConfig {
        BoardServiceConfig::new(self.store_timeout)
    }
}

fn parse_or<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|err: T::Err| invalid(name, raw, &err.to_string()))
}

fn invalid(name: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}
