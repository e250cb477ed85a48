//! Client configuration
//!
//! Resolution order, lowest to highest priority: built-in defaults, an
//! optional TOML file, `ROSTER_*` environment variables, then whatever the
//! caller sets through the `with_*` builders.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment override for [`ClientConfig::base_url`]
pub const ENV_BASE_URL: &str = "ROSTER_BASE_URL";
/// Environment override for [`ClientConfig::api_prefix`]
pub const ENV_API_PREFIX: &str = "ROSTER_API_PREFIX";
/// Environment override for [`ClientConfig::timeout_secs`]
pub const ENV_TIMEOUT_SECS: &str = "ROSTER_TIMEOUT_SECS";

/// Directory API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:8000`
    pub base_url: String,
    /// API mount point on the server
    pub api_prefix: String,
    /// Transport timeout per request
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With server origin
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With API prefix
    #[inline]
    #[must_use]
    pub fn with_api_prefix(mut self, api_prefix: impl Into<String>) -> Self {
        self.api_prefix = api_prefix.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load from an optional TOML file, then apply environment overrides
    ///
    /// # Errors
    /// - `ConfigError::Io` / `ConfigError::Parse` for an unreadable or invalid file
    /// - `ConfigError::InvalidValue` for an unparsable environment override
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Read a TOML file; missing keys keep their defaults
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::Parse` if it is not a valid config table
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `ROSTER_*` overrides from `lookup`
    ///
    /// # Errors
    /// - `ConfigError::InvalidValue` if `ROSTER_TIMEOUT_SECS` is not a number
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(api_prefix) = lookup(ENV_API_PREFIX) {
            self.api_prefix = api_prefix;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }

    /// Check the base URL scheme
    ///
    /// # Errors
    /// - `ConfigError::InvalidBaseUrl` if the scheme is not http/https
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    /// `base_url` joined with `api_prefix`, without a trailing slash
    #[must_use]
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }

    /// Request timeout as a `Duration`
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
            timeout_secs: 30,
        }
    }
}
