//! Output module for reporting crawl progress and results
//!
//! This module handles:
//! - The reporter interface the crawler emits page and failure records to
//! - Console and in-memory reporters
//! - Writing a markdown summary of a finished crawl

mod console;
mod markdown;
mod memory;
mod traits;

pub use console::{format_failure_line, format_page_line, ConsoleReporter};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use memory::MemoryReporter;
pub use traits::{
    snippet, CrawlReporter, CrawlSummary, FailureRecord, OutputError, OutputResult, PageRecord,
    SNIPPET_CHARS,
};
