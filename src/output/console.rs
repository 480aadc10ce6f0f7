//! Reporter that prints crawl events to stdout

use crate::output::traits::{CrawlReporter, CrawlSummary, FailureRecord, PageRecord};

/// Prints each fetched page, each failure, and the final visited list
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Creates a console reporter
    pub fn new() -> Self {
        Self
    }
}

/// Formats a fetched-page line
pub fn format_page_line(record: &PageRecord) -> String {
    format!(
        "found: [depth:{}] {} {:?}",
        record.depth, record.address, record.snippet
    )
}

/// Formats a failure line
pub fn format_failure_line(record: &FailureRecord) -> String {
    format!("error: {}: {}", record.address, record.error)
}

impl CrawlReporter for ConsoleReporter {
    fn page_fetched(&self, record: &PageRecord) {
        println!("{}", format_page_line(record));
    }

    fn fetch_failed(&self, record: &FailureRecord) {
        println!("{}", format_failure_line(record));
    }

    fn crawl_finished(&self, summary: &CrawlSummary) {
        println!("======== DONE ========");
        for address in &summary.visited {
            println!("{}", address);
        }
    }
}
