//! Typed errors raised while applying extraction rules to a catalogue page.

use thiserror::Error;

/// Failure to turn catalogue markup into records.
///
/// Any of these aborts the whole page: there is no per-record recovery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid selector for {field}: `{selector}`")]
    InvalidSelector { field: &'static str, selector: String },

    #[error("entry {index} has no element matching `{selector}` for {field}")]
    MissingElement { field: &'static str, selector: String, index: usize },

    #[error("entry {index} is missing attribute `{attr}` for {field}")]
    MissingAttribute { field: &'static str, attr: String, index: usize },
}

impl ExtractError {
    /// Name of the record field the failing rule was extracting.
    pub fn field(&self) -> &'static str {
        match self {
            ExtractError::InvalidSelector { field, .. }
            | ExtractError::MissingElement { field, .. }
            | ExtractError::MissingAttribute { field, .. } => *field,
        }
    }
}
