use std::path::PathBuf;
use std::time::Duration;

/// Default deadline for a single operation (30 seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MEETUP_REQUEST_TIMEOUT_SECS must be a positive integer, got `{0}`")]
    InvalidTimeout(String),
    #[error("MEETUP_LOG_FORMAT must be `pretty` or `json`, got `{0}`")]
    InvalidLogFormat(String),
    #[error("MEETUP_STORE_PATH must not be empty")]
    EmptyStorePath,
}

/// Log output format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// JSON file backing the meetup store; in-memory when `None`.
    pub store_path: Option<PathBuf>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `MEETUP_STORE_PATH` (optional) — JSON file for persistent storage
    /// - `MEETUP_REQUEST_TIMEOUT_SECS` (optional, default 30) — max seconds per operation
    /// - `MEETUP_LOG_FORMAT` (optional, `pretty` or `json`, default `pretty`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_path = match lookup("MEETUP_STORE_PATH") {
            Some(val) if val.trim().is_empty() => return Err(ConfigError::EmptyStorePath),
            Some(val) => Some(PathBuf::from(val)),
            None => None,
        };

        let request_timeout_secs = match lookup("MEETUP_REQUEST_TIMEOUT_SECS") {
            Some(val) => match val.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(val)),
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let log_format = match lookup("MEETUP_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        };

        Ok(Self {
            store_path,
            request_timeout: Duration::from_secs(request_timeout_secs),
            log_format,
        })
    }
}
