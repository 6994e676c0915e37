//! books-scraper - Paginated book catalogue scraper
//!
//! Scrapes every listing page of the catalogue into a JSON file.

use anyhow::Result;
use books_scraper::commands::ScrapeCommand;
use books_scraper::config::{Config, PersistMode};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "books-scraper",
    version,
    about = "Scrape a paginated book catalogue into a JSON file",
    long_about = "Fetches catalogue pages 1, 2, 3, ... until a page has no entries, \
                  then writes every title, price and link to a pretty-printed JSON array."
)]
struct Cli {
    /// Output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Delay between page fetches in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// Stop after this many pages
    #[arg(long)]
    max_pages: Option<u32>,

    /// When to write the output file (final, incremental)
    #[arg(long)]
    persist: Option<PersistMode>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(max_pages) = cli.max_pages {
        config.max_pages = Some(max_pages);
    }
    if let Some(persist) = cli.persist {
        config.persist = persist;
    }

    let summary = ScrapeCommand::new(config).execute().await?;

    println!("Scraping complete! {} records from {} pages.", summary.records.len(), summary.pages);
    println!("Data saved to: {}", summary.output.display());

    Ok(())
}
