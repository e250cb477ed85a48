//! Error types for the read boundary
//!
//! `FetchError` keeps the cause of a failed read for logging. Views collapse
//! every variant into one generic error state.

use std::path::PathBuf;

/// A failed read against the directory API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, reset, ...
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Transport timeout elapsed
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Non-2xx response
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body was not the expected JSON shape
    #[error("undecodable payload from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Classify a reqwest error
    #[must_use]
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            Self::Timeout { url }
        } else if err.is_decode() {
            Self::Decode {
                url,
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                url,
                status: status.as_u16(),
            }
        } else {
            Self::Transport {
                url,
                message: err.to_string(),
            }
        }
    }

    /// Address of the failed request
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. }
            | Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Decode { url, .. } => url,
        }
    }

    /// Short cause label, used as a metrics/log field
    #[inline]
    #[must_use]
    pub fn cause(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
        }
    }

    /// Check if the server answered 404
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Client configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `ClientConfig`
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Environment override did not parse
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    /// Base URL lacks an http/https scheme
    #[error("base url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    /// HTTP client could not be constructed
    #[error("http client construction failed: {0}")]
    Client(String),
}
