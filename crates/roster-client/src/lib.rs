//! Roster Client - read boundary for the directory API
//!
//! - [`RecordSource`]: async trait, one GET per call
//! - [`HttpRecordSource`]: reqwest implementation with a configurable timeout
//! - [`ClientConfig`]: defaults, TOML file and `ROSTER_*` environment overrides
//! - [`FetchError`]: the cause of a failed read (transport, timeout, status,
//!   decode)
//!
//! With the `mock` feature, `MockRecordSource` (mockall) is exported for
//! other crates' tests.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod source;

pub use config::{ClientConfig, ENV_API_PREFIX, ENV_BASE_URL, ENV_TIMEOUT_SECS};
pub use error::{ConfigError, FetchError};
pub use http::HttpRecordSource;
#[cfg(any(test, feature = "mock"))]
pub use source::MockRecordSource;
pub use source::{fetch_record, record_path, RecordSource, SEARCH_PATH};

/// URL type used for locations and endpoints
pub use reqwest::Url;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
