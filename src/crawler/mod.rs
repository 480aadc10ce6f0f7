//! Crawler module for concurrent, depth-bounded link crawling
//!
//! This module contains the core crawling logic, including:
//! - The recursive fan-out coordinator
//! - The visited set and its atomic test-and-set
//! - The task group that tracks transitively spawned work
//! - The fetcher capability with HTTP and in-memory implementations

mod coordinator;
mod fetcher;
mod fixture;
mod parser;
mod task_group;
mod visited;

pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher, Page};
pub use fixture::{tour_fixture, StaticFetcher};
pub use parser::{parse_html, ParsedPage};
pub use task_group::TaskGroup;

use crate::config::{Config, FetcherKind};
use crate::output::{generate_markdown_summary, CrawlReporter, CrawlSummary};
use crate::{ConfigError, FanoutError};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Builds the fetcher selected by the configuration
///
/// A fixture configuration without pages uses [`tour_fixture`].
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn Fetcher>, FanoutError> {
    match config.fetcher.kind {
        FetcherKind::Fixture => {
            let fixture = if config.fixture.pages.is_empty() {
                tour_fixture()
            } else {
                StaticFetcher::from_entries(&config.fixture.pages)
            };
            tracing::info!("Using fixture fetcher with {} pages", fixture.len());
            Ok(Arc::new(fixture.with_delay(Duration::from_millis(
                config.fetcher.delay_ms,
            ))))
        }
        FetcherKind::Http => {
            let user_agent = config.user_agent.as_ref().ok_or_else(|| {
                ConfigError::Validation(
                    "[user-agent] section is required when fetcher kind is 'http'".to_string(),
                )
            })?;
            tracing::info!("Using HTTP fetcher as {}", user_agent.header_value());
            Ok(Arc::new(HttpFetcher::new(user_agent, &config.fetcher)?))
        }
    }
}

/// Runs a complete crawl operation from configuration
///
/// This is the main entry point for the CLI. It will:
/// 1. Build the configured fetcher
/// 2. Crawl from the seed and wait for every task to finish
/// 3. Write the markdown summary, if an output path is configured
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `config_hash` - Hash of the config file, recorded in the summary
/// * `reporter` - Receives page records, failures, and the final summary
pub async fn crawl(
    config: &Config,
    config_hash: Option<String>,
    reporter: Arc<dyn CrawlReporter>,
) -> Result<CrawlSummary, FanoutError> {
    let fetcher = build_fetcher(config)?;

    let mut summary = run_crawl(
        config.crawler.seed.clone(),
        config.crawler.max_depth,
        fetcher,
        reporter,
    )
    .await;
    summary.config_hash = config_hash;

    if let Some(path) = &config.output.summary_path {
        generate_markdown_summary(&summary, Path::new(path))?;
        tracing::info!("Summary written to: {}", path);
    }

    Ok(summary)
}
