//! Scrape command: walks catalogue pages in order and persists the records.

use crate::catalog::{CatalogClient, PageFetcher, PageOutcome, PageSource, Record};
use crate::config::{Config, PersistMode};
use crate::store::JsonStore;
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Why pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Page returned 200 but had no entries.
    Exhausted { page: u32 },
    /// Page returned a status other than 200.
    ServerError { page: u32, status: u16 },
    /// The configured page ceiling was reached.
    PageLimit { limit: u32 },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted { page } => write!(f, "page {} had no entries", page),
            StopReason::ServerError { page, status } => {
                write!(f, "page {} returned status {}", page, status)
            }
            StopReason::PageLimit { limit } => write!(f, "page limit of {} reached", limit),
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    pub records: Vec<Record>,
    /// Pages that contributed at least one record.
    pub pages: u32,
    pub stop: StopReason,
    pub output: PathBuf,
}

/// Executes a full catalogue scrape.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scrape against the live site and writes the output file.
    pub async fn execute(&self) -> Result<ScrapeSummary> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_source(&client).await
    }

    /// Runs the scrape with a provided page source (for testing).
    pub async fn execute_with_source(&self, source: &impl PageSource) -> Result<ScrapeSummary> {
        let fetcher = PageFetcher::from_config(source, &self.config)?;
        let store = JsonStore::new(&self.config.output);

        info!("Starting scrape of {} (persist: {})", source.page_url(1), self.config.persist);

        let (records, stop) = self.collect(&fetcher, &store).await?;
        info!("Stopping: {}", stop);

        store.write(&records)?;
        info!("Saved {} records to {}", records.len(), store.path().display());

        let pages = match stop {
            StopReason::Exhausted { page } | StopReason::ServerError { page, .. } => page - 1,
            StopReason::PageLimit { limit } => limit,
        };

        Ok(ScrapeSummary { records, pages, stop, output: self.config.output.clone() })
    }

    /// Fetches pages until one is empty, errors, or the page ceiling is hit.
    async fn collect<S: PageSource + ?Sized>(
        &self,
        fetcher: &PageFetcher<'_, S>,
        store: &JsonStore,
    ) -> Result<(Vec<Record>, StopReason)> {
        let mut records: Vec<Record> = Vec::new();
        let mut page: u32 = 1;

        loop {
            if let Some(limit) = self.config.max_pages {
                if page > limit {
                    return Ok((records, StopReason::PageLimit { limit }));
                }
            }

            if page > 1 {
                self.delay().await;
            }

            info!("Scraping page {}...", page);

            let batch = match fetcher.fetch_outcome(page).await? {
                PageOutcome::Records(batch) => batch,
                PageOutcome::Exhausted => {
                    info!("No more pages found");
                    return Ok((records, StopReason::Exhausted { page }));
                }
                PageOutcome::ServerError(status) => {
                    return Ok((records, StopReason::ServerError { page, status }));
                }
            };

            debug!("Page {} returned {} records", page, batch.len());
            records.extend(batch);

            if self.config.persist == PersistMode::Incremental {
                store.write(&records)?;
            }

            page += 1;
        }
    }

    /// Politeness pause between consecutive page fetches.
    async fn delay(&self) {
        if self.config.delay_ms == 0 {
            return;
        }

        debug!("Delaying {}ms", self.config.delay_ms);
        tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
    }
}
