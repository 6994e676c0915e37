//! Catalogue-specific modules for HTTP fetching, extraction rules, and data models.

pub mod client;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{CatalogClient, PageResponse, PageSource};
pub use fetcher::PageFetcher;
pub use models::{PageOutcome, Record};
pub use parser::Extractor;
pub use selectors::{ExtractionRules, RuleSpec};
