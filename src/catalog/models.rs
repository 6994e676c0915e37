//! Data models for catalogue records and per-page fetch outcomes.

use serde::{Deserialize, Serialize};

/// One product listing extracted from a catalogue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Full title, taken from the heading link's `title` attribute
    pub title: String,
    /// Price exactly as displayed, currency symbol included
    pub price: String,
    /// Absolute URL of the detail page
    pub link: String,
}

impl Record {
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self { title: title.into(), price: price.into(), link: link.into() }
    }
}

/// What a single page fetch produced.
///
/// Callers that only care about records use [`PageOutcome::into_records`],
/// which folds both terminal variants into an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// At least one record, in document order.
    Records(Vec<Record>),
    /// The server answered with a status other than 200.
    ServerError(u16),
    /// A 200 response that contained no entries.
    Exhausted,
}

impl PageOutcome {
    /// Wraps extracted records, mapping an empty page to `Exhausted`.
    pub fn from_records(records: Vec<Record>) -> Self {
        if records.is_empty() {
            PageOutcome::Exhausted
        } else {
            PageOutcome::Records(records)
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            PageOutcome::Records(records) => records,
            PageOutcome::ServerError(_) | PageOutcome::Exhausted => Vec::new(),
        }
    }
}
