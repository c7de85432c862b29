//! Runtime configuration for the client.
//!
//! Everything is read from environment variables with development defaults,
//! so the binary runs against a local backend with no setup. Numeric
//! values are validated here so the rest of the crate can trust them.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Public so tests can refer to them.
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_MAX_UPLOAD_MB: &str = "MAX_UPLOAD_MB";
pub const ENV_POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_PREFS_PATH: &str = "PREFS_PATH";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_MAX_UPLOAD_MB: u64 = 250;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_PREFS_PATH: &str = ".claimlens-prefs.json";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_base_url: String,
    max_upload_mb: u64,
    poll_interval_secs: u64,
    request_timeout_secs: u64,
    prefs_path: String,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        api_base_url: impl Into<String>,
        max_upload_mb: u64,
        poll_interval_secs: u64,
        request_timeout_secs: u64,
        prefs_path: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            max_upload_mb,
            poll_interval_secs,
            request_timeout_secs,
            prefs_path: prefs_path.into(),
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url =
            env::var(ENV_API_BASE_URL).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let max_upload_mb = parse_env(ENV_MAX_UPLOAD_MB, DEFAULT_MAX_UPLOAD_MB)?;
        let poll_interval_secs = parse_env(ENV_POLL_INTERVAL_SECS, DEFAULT_POLL_INTERVAL_SECS)?;
        let request_timeout_secs =
            parse_env(ENV_REQUEST_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let prefs_path =
            env::var(ENV_PREFS_PATH).unwrap_or_else(|_| DEFAULT_PREFS_PATH.to_string());

        Ok(Self {
            api_base_url,
            max_upload_mb,
            poll_interval_secs,
            request_timeout_secs,
            prefs_path,
        })
    }

    /// Base URL of the fact-checking backend, without a trailing slash.
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
    /// Largest accepted media upload, in megabytes.
    pub fn max_upload_mb(&self) -> u64 {
        self.max_upload_mb
    }
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
    /// Fixed interval between job status requests.
    pub fn poll_interval_secs(&self) -> u64 {
        self.poll_interval_secs
    }
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
    /// Path of the JSON file backing stored preferences.
    pub fn prefs_path(&self) -> &str {
        &self.prefs_path
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            prefs_path: DEFAULT_PREFS_PATH.to_string(),
        }
    }
}

fn parse_env(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            field: key,
            reason: format!("expected an integer, got '{raw}'"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
