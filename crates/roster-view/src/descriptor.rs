//! Per-record parameters of the generic detail view
//!
//! A descriptor supplies what differs between record kinds: the record type,
//! and its loaded layout. Loading and error indicators are
//! derived from the record noun.

use crate::markup::{Element, Markup};
use roster_model::{Record, RecordKind};

/// Describes one kind of detail page
pub trait RecordDescriptor: Send + Sync + 'static {
    type Record: Record;

    #[must_use]
    fn kind() -> RecordKind {
        <Self::Record as Record>::KIND
    }

    /// Layout of a loaded record
    fn render(record: &Self::Record) -> Markup;

    #[must_use]
    fn loading_text() -> String {
        format!("Loading {} details...", Self::kind().noun())
    }

    #[must_use]
    fn error_text() -> String {
        format!(
            "Unable to load {} details. Please try again later.",
            Self::kind().noun()
        )
    }
}

/// Indicator shown while a read is in flight
#[must_use]
pub fn loading_indicator(text: impl Into<String>) -> Markup {
    Element::new("div").class("loading").text(text).into()
}

/// Indicator shown when a read failed
#[must_use]
pub fn error_indicator(message: impl Into<String>) -> Markup {
    Element::new("div").class("error").text(message).into()
}
