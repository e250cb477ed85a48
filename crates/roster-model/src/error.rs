//! Error types for record decoding and search query parsing

use crate::record::RecordKind;

/// Record decoding errors
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Payload does not match the record shape
    #[error("malformed {kind} payload: {source}")]
    Malformed {
        kind: RecordKind,
        #[source]
        source: serde_json::Error,
    },

    /// Identifier is not a positive integer
    #[error("invalid record id: '{0}'")]
    InvalidId(String),
}

/// Search query validation errors
///
/// Messages match the ones the directory API returns for the same
/// parameters, so the viewer reports them identically.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// Unknown `type` value
    #[error("Invalid search type. Must be one of: all, companies, employees")]
    InvalidType(String),

    /// Unknown `sort_order` value
    #[error("Invalid sort order. Must be 'asc' or 'desc'")]
    InvalidSortOrder(String),

    /// Unknown `sort_by` value
    #[error(
        "Invalid sort field. Must be one of: name, date_founded, employee_count, \
         total_deals_amount, last_deal_date"
    )]
    InvalidSortField(String),

    /// Numeric filter did not parse
    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// Date filter did not parse as YYYY-MM-DD
    #[error("invalid date for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

impl QueryError {
    /// The offending raw value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidType(v)
            | Self::InvalidSortOrder(v)
            | Self::InvalidSortField(v)
            | Self::InvalidNumber { value: v, .. }
            | Self::InvalidDate { value: v, .. } => v,
        }
    }
}
