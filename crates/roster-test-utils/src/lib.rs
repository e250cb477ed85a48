//! Testing utilities for Roster workspace
//!
//! Shared fixtures (the Acme company and its employees) and stub
//! [`RecordSource`](roster_client::RecordSource) implementations that hold a
//! fetch pending forever, fail it, answer from a table, or release it on
//! demand. [`assert_snapshot`] compares rendered markup with golden files.

#![allow(missing_docs)]

pub mod fixtures;
pub mod snapshot;
pub mod sources;

pub use fixtures::*;
pub use snapshot::assert_snapshot;
pub use sources::{FailingSource, GatedSource, PendingSource, StaticSource};
