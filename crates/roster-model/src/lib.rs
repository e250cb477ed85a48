//! Roster Model - typed records for the company directory API
//!
//! Defines the read-only snapshot types the viewer renders:
//! - Company and employee records, with their nested deals, country and
//!   company references
//! - Display labels for enumerated fields (gender codes, active status)
//! - Search queries and the normalized search result sections
//!
//! Every optional attribute is modelled explicitly (`Option`, empty `Vec`)
//! so renderers can handle the absent case per field.
//!
//! # Example
//!
//! ```rust
//! use roster_model::{decode, Employee, Gender};
//!
//! let value = serde_json::json!({
//!     "id": 2,
//!     "name": "Jane Doe",
//!     "job_title": "Product Manager",
//!     "email": "jane.doe@acme.com",
//!     "phone_number": null,
//!     "gender": "F",
//!     "company": null
//! });
//! let employee: Employee = decode(value).unwrap();
//! assert_eq!(employee.gender, Gender::Female);
//! assert!(employee.phone_number.is_none());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod record;
pub mod search;

pub use error::{QueryError, RecordError};
pub use record::{
    decode, ActiveStatus, Company, CompanyRef, Country, Deal, Employee, EmployeeSummary, Gender,
    Record, RecordId, RecordKind,
};
pub use search::{
    SearchHit, SearchQuery, SearchResults, SearchSection, SearchType, SortField, SortOrder,
    DEFAULT_SEARCH_SIZE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
