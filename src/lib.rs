//! Fanout Crawler: a bounded-depth concurrent link crawler
//!
//! This crate recursively visits the links discovered from a seed address up
//! to a fixed depth, spawning one task per discovered link, while guaranteeing
//! that each distinct address is fetched at most once.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Fanout Crawler operations
#[derive(Debug, Error)]
pub enum FanoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// A failed fetch, attached to the address that failed
///
/// Fetch failures are local to the task that hit them: they are reported
/// once and never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not found: {address}")]
    NotFound { address: String },

    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("HTTP {status} for {address}")]
    Status { address: String, status: u16 },

    #[error("HTTP error for {address}: {source}")]
    Http {
        address: String,
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The address whose fetch failed
    pub fn address(&self) -> &str {
        match self {
            Self::NotFound { address }
            | Self::InvalidAddress { address, .. }
            | Self::Status { address, .. }
            | Self::Http { address, .. } => address,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Fanout Crawler operations
pub type Result<T> = std::result::Result<T, FanoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Crawler, Fetcher, HttpFetcher, Page, StaticFetcher};
pub use output::{ConsoleReporter, CrawlReporter, CrawlSummary, MemoryReporter};
pub use state::TaskOutcome;
