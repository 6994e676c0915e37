//! HTML extraction of catalogue listing pages.

use crate::catalog::models::Record;
use crate::catalog::selectors::{ExtractionRules, BOOKS};
use crate::error::ExtractError;
use scraper::Html;
use tracing::{debug, trace};

/// Turns listing markup into records using a compiled rule set.
pub struct Extractor {
    rules: ExtractionRules,
    link_base: String,
}

impl Extractor {
    /// Creates an extractor. `link_base` is prepended verbatim to every
    /// relative href, so it should end with `/`.
    pub fn new(rules: ExtractionRules, link_base: impl Into<String>) -> Self {
        Self { rules, link_base: link_base.into() }
    }

    /// Extractor with the built-in books.toscrape rules.
    pub fn books(link_base: impl Into<String>) -> Self {
        Self::new(BOOKS.clone(), link_base)
    }

    /// Extracts every entry on the page in document order.
    ///
    /// Fails on the first entry missing a required field.
    pub fn extract(&self, html: &str) -> Result<Vec<Record>, ExtractError> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for (i, entry) in document.select(&self.rules.entry).enumerate() {
            let index = i + 1;
            let title = self.rules.title.extract(entry, index)?;
            let price = self.rules.price.extract(entry, index)?;
            let href = self.rules.link.extract(entry, index)?;

            let record = Record { title, price, link: format!("{}{}", self.link_base, href) };
            trace!("Parsed record: {} - {}", record.title, record.price);
            records.push(record);
        }

        debug!("Extracted {} records", records.len());
        Ok(records)
    }
}
