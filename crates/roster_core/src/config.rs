//! Process-start configuration.
//!
//! # Responsibility
//! - Resolve database and logging settings from environment variables.
//! - Apply defaults and reject malformed values before anything connects.
//!
//! # Invariants
//! - Settings are read once at startup and never change afterwards.
//! - `log_dir` is always absolute.

use crate::db::ConnectOptions;
use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";
pub const ENV_DB_CREATE: &str = "ROSTER_DB_CREATE";
pub const ENV_LOG_LEVEL: &str = "ROSTER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ROSTER_LOG_DIR";

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./data/roster.sqlite3";
const DEFAULT_LOG_SUBDIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
    WorkingDirectory(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                var,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for {var}; expected {expected}"),
            Self::WorkingDirectory(message) => {
                write!(f, "cannot resolve working directory: {message}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub connection: ConnectOptions,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// Optional variables (with defaults):
    /// - `ROSTER_DB_PATH`: database file (default `./data/roster.sqlite3`)
    /// - `ROSTER_DB_CREATE`: create a missing file (default `true`)
    /// - `ROSTER_LOG_LEVEL`: `trace|debug|info|warn|error`
    /// - `ROSTER_LOG_DIR`: absolute log directory (default `<cwd>/logs`)
    ///
    /// # Errors
    /// - Returns `ConfigError` for malformed values or an unreadable working
    ///   directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd =
            std::env::current_dir().map_err(|err| ConfigError::WorkingDirectory(err.to_string()))?;
        Self::from_lookup(&cwd, |key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    ///
    /// Relative `ROSTER_LOG_DIR` values are resolved against `cwd`.
    pub fn from_lookup(
        cwd: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let path = read(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let create_if_missing = match read(ENV_DB_CREATE) {
            Some(value) => parse_bool(ENV_DB_CREATE, &value)?,
            None => true,
        };

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(value) => normalize_level(&value).map_err(|_| ConfigError::InvalidValue {
                var: ENV_LOG_LEVEL,
                value,
                expected: "trace|debug|info|warn|error",
            })?,
            None => default_log_level(),
        };

        let log_dir = match read(ENV_LOG_DIR) {
            Some(value) => cwd.join(value),
            None => cwd.join(DEFAULT_LOG_SUBDIR),
        };

        Ok(Self {
            connection: ConnectOptions {
                path: PathBuf::from(path),
                create_if_missing,
            },
            log_level,
            log_dir,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            expected: "true|false",
        }),
    }
}
