//! HTTP client for catalogue listing pages.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;

/// Raw answer for one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub status: u16,
    /// Empty unless `status` is 200.
    pub body: String,
}

impl PageResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: String::new() }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for fetching listing pages - enables mocking for tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the listing page with the given 1-based index.
    async fn fetch(&self, page: u32) -> Result<PageResponse>;

    /// URL requested for the given page index.
    fn page_url(&self, page: u32) -> String;
}

/// Catalogue HTTP client. One request per call, no retries.
pub struct CatalogClient {
    client: Client,
    config: Config,
}

impl CatalogClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config: config.clone() })
    }
}

#[async_trait]
impl PageSource for CatalogClient {
    async fn fetch(&self, page: u32) -> Result<PageResponse> {
        let url = self.page_url(page);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", self.config.user_agent.as_str())
            .send()
            .await
            .with_context(|| format!("Failed to send request for page {}", page))?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        if status != 200 {
            return Ok(PageResponse::status(status));
        }

        let body = response.text().await.context("Failed to read response body")?;
        Ok(PageResponse { status, body })
    }

    fn page_url(&self, page: u32) -> String {
        self.config.page_url(page)
    }
}
