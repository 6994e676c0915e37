//! books-scraper - Paginated book catalogue scraper
//!
//! Walks the listing pages of a catalogue site in order, extracts one
//! record per product card, and writes the collection to a JSON file.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod store;

pub use catalog::models::{PageOutcome, Record};
pub use config::{Config, PersistMode};
pub use error::ExtractError;
