//! Reporter that keeps every event in memory

use crate::output::traits::{CrawlReporter, CrawlSummary, FailureRecord, PageRecord};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Recorded {
    pages: Vec<PageRecord>,
    failures: Vec<FailureRecord>,
    summary: Option<CrawlSummary>,
}

/// Collects page records, failure records, and the final summary
///
/// Records appear in the order the crawl tasks reported them.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    recorded: Mutex<Recorded>,
}

impl MemoryReporter {
    /// Creates an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// All fetched-page records so far
    pub fn pages(&self) -> Vec<PageRecord> {
        self.lock().pages.clone()
    }

    /// All failure records so far
    pub fn failures(&self) -> Vec<FailureRecord> {
        self.lock().failures.clone()
    }

    /// The final summary, once the crawl has finished
    pub fn summary(&self) -> Option<CrawlSummary> {
        self.lock().summary.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CrawlReporter for MemoryReporter {
    fn page_fetched(&self, record: &PageRecord) {
        self.lock().pages.push(record.clone());
    }

    fn fetch_failed(&self, record: &FailureRecord) {
        self.lock().failures.push(record.clone());
    }

    fn crawl_finished(&self, summary: &CrawlSummary) {
        self.lock().summary = Some(summary.clone());
    }
}
