//! In-memory fetcher with canned pages
//!
//! Used by tests and by the demo mode of the CLI. The optional delay stands in
//! for network latency so that concurrent fetches actually overlap.

use crate::config::FixtureEntry;
use crate::crawler::fetcher::{Fetcher, Page};
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Fetcher that answers from a fixed address → page table
///
/// Unknown addresses fail with [`FetchError::NotFound`]. Every call is
/// counted per address, including failing ones.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Page>,
    delay: Duration,
    calls: Mutex<HashMap<String, usize>>,
}

impl StaticFetcher {
    /// Creates a fetcher with no pages and no delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fetcher from config entries
    pub fn from_entries(entries: &[FixtureEntry]) -> Self {
        entries.iter().fold(Self::new(), |fetcher, entry| {
            fetcher.with_page(&entry.address, &entry.body, entry.links.iter())
        })
    }

    /// Adds a page
    pub fn with_page<I, S>(mut self, address: &str, body: &str, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages.insert(
            address.to_string(),
            Page::new(body, links.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Sets the artificial latency applied to every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of times `address` was fetched
    pub fn calls(&self, address: &str) -> usize {
        self.lock_calls().get(address).copied().unwrap_or(0)
    }

    /// Total number of fetch calls across all addresses
    pub fn total_calls(&self) -> usize {
        self.lock_calls().values().sum()
    }

    /// Number of canned pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns whether no page is defined
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, HashMap<String, usize>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        tracing::debug!("Fetching: {}", address);
        *self.lock_calls().entry(address.to_string()).or_insert(0) += 1;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.pages
            .get(address)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                address: address.to_string(),
            })
    }
}

/// A small site map of the Go tour pages
///
/// `https://golang.org/cmd/` is linked but has no page, so crawling this
/// fixture always exercises one failure.
pub fn tour_fixture() -> StaticFetcher {
    StaticFetcher::new()
        .with_page(
            "https://golang.org/",
            "The Go Programming Language",
            ["https://golang.org/pkg/", "https://golang.org/cmd/"],
        )
        .with_page(
            "https://golang.org/pkg/",
            "Packages",
            [
                "https://golang.org/",
                "https://golang.org/cmd/",
                "https://golang.org/pkg/fmt/",
                "https://golang.org/pkg/os/",
            ],
        )
        .with_page(
            "https://golang.org/pkg/fmt/",
            "Package fmt",
            ["https://golang.org/", "https://golang.org/pkg/"],
        )
        .with_page(
            "https://golang.org/pkg/os/",
            "Package os",
            ["https://golang.org/", "https://golang.org/pkg/"],
        )
}
