//! Roster View - pages of the directory viewer
//!
//! - [`DetailView`]: generic record page driven by a [`RecordDescriptor`]
//!   ([`CompanyDescriptor`], [`EmployeeDescriptor`])
//! - [`SearchView`]: search results page
//! - [`App`]: navigator that resolves locations through the [`RouteTable`]
//! - [`Markup`]: rendered tree with HTML and plain-text output
//!
//! Every page follows the same fetch lifecycle (see [`fetch`]): Loading on
//! mount, then Error or Loaded, with late responses from unmounted or
//! superseded mounts discarded.
//!
//! # Example
//!
//! ```no_run
//! use roster_client::{ClientConfig, HttpRecordSource};
//! use roster_view::App;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpRecordSource::new(&ClientConfig::default())?;
//! let mut app = App::new(Arc::new(source));
//! if let Some(fetch) = app.navigate("/companies/1") {
//!     fetch.settled().await;
//! }
//! print!("{}", app.render().to_html());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod app;
pub mod company;
pub mod descriptor;
pub mod detail;
pub mod employee;
pub mod fetch;
pub mod format;
pub mod markup;
pub mod route;
pub mod search;

pub use app::{ActiveView, App};
pub use company::CompanyDescriptor;
pub use descriptor::RecordDescriptor;
pub use detail::DetailView;
pub use employee::EmployeeDescriptor;
pub use fetch::{FetchHandle, FetchOutcome, Phase, Settlement, ViewId, FETCH_COUNTER};
pub use markup::{Element, Markup};
pub use route::{Location, Route, RouteTable};
pub use search::SearchView;

/// Detail page for a company
pub type CompanyDetail = DetailView<CompanyDescriptor>;

/// Detail page for an employee
pub type EmployeeDetail = DetailView<EmployeeDescriptor>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
