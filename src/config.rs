//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::selectors::RuleSpec;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Catalogue path under the site root
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Output JSON file
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Pause between consecutive page fetches in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Stop after this many pages (unbounded when unset)
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// When the output file is written
    #[serde(default)]
    pub persist: PersistMode,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Selector rules for the target markup
    #[serde(default)]
    pub rules: RuleSpec,
}

fn default_base_url() -> String {
    "http://books.toscrape.com".to_string()
}

fn default_catalog_path() -> String {
    "catalogue".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("data/books.json")
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_path: default_catalog_path(),
            user_agent: default_user_agent(),
            output: default_output(),
            delay_ms: default_delay_ms(),
            max_pages: None,
            persist: PersistMode::Final,
            timeout_secs: default_timeout_secs(),
            rules: RuleSpec::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the listing page with the given 1-based index.
    pub fn page_url(&self, page: u32) -> String {
        format!("{}page-{}.html", self.link_base(), page)
    }

    /// Prefix that relative detail hrefs are appended to.
    pub fn link_base(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.catalog_path.trim_matches('/')
        )
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("books-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("BOOKS_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(output) = std::env::var("BOOKS_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        if let Ok(delay) = std::env::var("BOOKS_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(max_pages) = std::env::var("BOOKS_MAX_PAGES") {
            if let Ok(m) = max_pages.parse() {
                self.max_pages = Some(m);
            }
        }

        self
    }
}

/// When the accumulated records are written to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistMode {
    /// Single write after the last page.
    #[default]
    Final,
    /// Rewrite the file after every page that produced records.
    Incremental,
}

impl std::str::FromStr for PersistMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "final" => Ok(PersistMode::Final),
            "incremental" => Ok(PersistMode::Incremental),
            _ => Err(format!("Unknown persist mode: {}. Use: final, incremental", s)),
        }
    }
}

impl std::fmt::Display for PersistMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistMode::Final => write!(f, "final"),
            PersistMode::Incremental => write!(f, "incremental"),
        }
    }
}
