//! Page fetcher: one request, then extraction only when the status is 200.

use crate::catalog::client::PageSource;
use crate::catalog::models::{PageOutcome, Record};
use crate::catalog::parser::Extractor;
use crate::catalog::selectors::ExtractionRules;
use crate::config::Config;
use anyhow::{Context, Result};
use tracing::warn;

/// Fetches and extracts single listing pages from a [`PageSource`].
pub struct PageFetcher<'a, S: PageSource + ?Sized> {
    source: &'a S,
    extractor: Extractor,
}

impl<'a, S: PageSource + ?Sized> PageFetcher<'a, S> {
    pub fn new(source: &'a S, extractor: Extractor) -> Self {
        Self { source, extractor }
    }

    /// Builds a fetcher whose rules and link base come from `config`.
    pub fn from_config(source: &'a S, config: &Config) -> Result<Self> {
        let rules =
            ExtractionRules::compile(&config.rules).context("Invalid extraction rules")?;
        Ok(Self::new(source, Extractor::new(rules, config.link_base())))
    }

    /// Fetches one page and reports exactly why it did or did not yield records.
    pub async fn fetch_outcome(&self, page: u32) -> Result<PageOutcome> {
        let response = self.source.fetch(page).await?;

        if !response.is_ok() {
            warn!("Failed to retrieve page {} (status {})", page, response.status);
            return Ok(PageOutcome::ServerError(response.status));
        }

        let records = self
            .extractor
            .extract(&response.body)
            .with_context(|| format!("Failed to extract records from page {}", page))?;

        Ok(PageOutcome::from_records(records))
    }

    /// Fetches one page; non-200 and empty pages both yield an empty list.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Record>> {
        Ok(self.fetch_outcome(page).await?.into_records())
    }
}
