//! Reporter trait and report record types
//!
//! This module defines the interface the crawler reports through and the
//! data structures it emits: one record per fetched page, one per failed
//! fetch, and a summary once all work has completed.

use crate::crawler::Page;
use crate::FetchError;
use thiserror::Error;

/// Maximum number of characters kept in [`PageRecord::snippet`]
pub const SNIPPET_CHARS: usize = 80;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Remaining depth budget when the page was fetched
    pub depth: u32,

    /// The fetched address
    pub address: String,

    /// Leading part of the page content
    pub snippet: String,

    /// Outbound addresses discovered on the page
    pub links: Vec<String>,
}

impl PageRecord {
    /// Builds a record from a fetched page
    pub fn new(depth: u32, address: &str, page: &Page) -> Self {
        Self {
            depth,
            address: address.to_string(),
            snippet: snippet(&page.content, SNIPPET_CHARS),
            links: page.links.clone(),
        }
    }
}

/// A failed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Remaining depth budget when the fetch was attempted
    pub depth: u32,

    /// The address that failed
    pub address: String,

    /// Error message
    pub error: String,
}

impl FailureRecord {
    /// Builds a record from a fetch error
    pub fn new(depth: u32, error: &FetchError) -> Self {
        Self {
            depth,
            address: error.address().to_string(),
            error: error.to_string(),
        }
    }
}

/// Summary of a finished crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    // Run metadata
    pub seeds: Vec<String>,
    pub max_depth: u32,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub duration_ms: Option<u64>,
    pub config_hash: Option<String>,

    // Overall statistics
    pub pages_fetched: u64,
    pub fetch_failures: u64,

    // Every address claimed during the crawl, sorted
    pub visited: Vec<String>,
}

impl CrawlSummary {
    /// Creates a new empty crawl summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fetch attempts (successful or not)
    pub fn total_fetches(&self) -> u64 {
        self.pages_fetched + self.fetch_failures
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total_fetches();
        if total == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / total as f64) * 100.0
    }
}

/// Reporting collaborator for crawl events
///
/// Methods are called from inside concurrently running crawl tasks, so
/// implementations must be thread-safe. Reporting never fails the crawl.
pub trait CrawlReporter: Send + Sync {
    /// Records a successfully fetched page
    fn page_fetched(&self, record: &PageRecord);

    /// Records a failed fetch
    fn fetch_failed(&self, record: &FailureRecord);

    /// Called once after every task has finished
    fn crawl_finished(&self, summary: &CrawlSummary);
}

/// Truncates `content` to at most `max_chars` characters
///
/// A trailing `…` marks content that was cut.
pub fn snippet(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &content[..cut]),
        None => content.to_string(),
    }
}
