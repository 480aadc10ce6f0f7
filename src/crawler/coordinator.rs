//! Crawler coordinator - recursive fan-out with at-most-once fetching
//!
//! Every scheduled address becomes its own task in the crawler's
//! [`TaskGroup`]. A task:
//! 1. Stops if no depth remains
//! 2. Claims the address in the [`VisitedSet`] (test-and-set), stopping if
//!    another task got there first
//! 3. Fetches the page, reporting the result or the failure
//! 4. Schedules one child per discovered link at `depth - 1`
//!
//! The visited-set lock is held only for the test-and-set, never across the
//! fetch.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::task_group::TaskGroup;
use crate::crawler::visited::VisitedSet;
use crate::output::{CrawlReporter, CrawlSummary, FailureRecord, PageRecord};
use crate::state::TaskOutcome;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

struct CrawlState {
    visited: VisitedSet,
    tasks: TaskGroup,
    reporter: Arc<dyn CrawlReporter>,
    seeds: Mutex<Vec<(String, u32)>>,
    pages_fetched: AtomicU64,
    fetch_failures: AtomicU64,
    started_at: DateTime<Utc>,
}

/// Bounded-depth concurrent crawler
///
/// Cloning is cheap and every clone shares the same visited set and task
/// group. Separate `Crawler::new` instances are fully independent.
#[derive(Clone)]
pub struct Crawler {
    state: Arc<CrawlState>,
}

impl std::fmt::Debug for Crawler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crawler")
            .field("outstanding", &self.state.tasks.outstanding())
            .finish()
    }
}

impl Crawler {
    /// Creates a crawler that reports to `reporter`
    pub fn new(reporter: Arc<dyn CrawlReporter>) -> Self {
        Self {
            state: Arc::new(CrawlState {
                visited: VisitedSet::new(),
                tasks: TaskGroup::new(),
                reporter,
                seeds: Mutex::new(Vec::new()),
                pages_fetched: AtomicU64::new(0),
                fetch_failures: AtomicU64::new(0),
                started_at: Utc::now(),
            }),
        }
    }

    /// Schedules `address` as a crawl seed and returns without waiting
    ///
    /// May be called several times; all seeds share one visited set. Use
    /// [`Crawler::wait`] to block until the crawl has finished.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn crawl(&self, address: impl Into<String>, max_depth: u32, fetcher: Arc<dyn Fetcher>) {
        let address = address.into();
        tracing::info!("Crawling {} with max depth {}", address, max_depth);

        self.state
            .seeds
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((address.clone(), max_depth));

        self.schedule(address, max_depth, fetcher);
    }

    /// Waits until every transitively scheduled task has finished
    ///
    /// Returns the visited addresses, sorted. The membership is only ever
    /// handed out from here, once no task is left to add to it.
    pub async fn wait(&self) -> Vec<String> {
        self.state.tasks.join().await;
        let visited = self.state.visited.snapshot();
        tracing::debug!(
            "All crawl tasks finished, {} addresses visited",
            visited.len()
        );
        visited
    }

    /// Number of tasks scheduled and not yet finished
    pub fn outstanding(&self) -> usize {
        self.state.tasks.outstanding()
    }

    fn summary(&self, visited: Vec<String>) -> CrawlSummary {
        let finished_at = Utc::now();
        let seeds = self
            .state
            .seeds
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        CrawlSummary {
            max_depth: seeds.iter().map(|(_, depth)| *depth).max().unwrap_or(0),
            seeds: seeds.into_iter().map(|(address, _)| address).collect(),
            started_at: self.state.started_at.to_rfc3339(),
            finished_at: Some(finished_at.to_rfc3339()),
            duration_ms: u64::try_from((finished_at - self.state.started_at).num_milliseconds())
                .ok(),
            config_hash: None,
            pages_fetched: self.state.pages_fetched.load(Ordering::SeqCst),
            fetch_failures: self.state.fetch_failures.load(Ordering::SeqCst),
            visited,
        }
    }

    /// Waits for completion, then reports and returns the summary
    pub async fn finish(self) -> CrawlSummary {
        let visited = self.wait().await;

        let summary = self.summary(visited);
        tracing::info!(
            "Crawl completed: {} visited, {} fetched, {} failed",
            summary.visited.len(),
            summary.pages_fetched,
            summary.fetch_failures
        );
        self.state.reporter.crawl_finished(&summary);

        summary
    }

    fn schedule(&self, address: String, depth: u32, fetcher: Arc<dyn Fetcher>) {
        tracing::debug!("Scheduling {} at depth {}", address, depth);

        let crawler = self.clone();
        self.state.tasks.spawn(async move {
            let outcome = crawler.visit(&address, depth, fetcher).await;
            if outcome.fetched() {
                tracing::trace!(
                    "Task for {} at depth {} finished: {}, {} children",
                    address,
                    depth,
                    outcome,
                    outcome.children()
                );
            }
        });
    }

    /// Runs one crawl task to completion
    ///
    /// Children are scheduled (and counted) before this returns, so the
    /// enclosing task's unit is released only after theirs are taken.
    async fn visit(&self, address: &str, depth: u32, fetcher: Arc<dyn Fetcher>) -> TaskOutcome {
        if depth == 0 {
            return TaskOutcome::DepthExhausted;
        }

        if !self.state.visited.insert_if_absent(address) {
            return TaskOutcome::AlreadyVisited;
        }

        match fetcher.fetch(address).await {
            Ok(page) => {
                self.state.pages_fetched.fetch_add(1, Ordering::SeqCst);
                self.state
                    .reporter
                    .page_fetched(&PageRecord::new(depth, address, &page));

                let children = page.links.len();
                for link in page.links {
                    self.schedule(link, depth - 1, Arc::clone(&fetcher));
                }
                TaskOutcome::ChildrenScheduled(children)
            }
            Err(e) => {
                self.state.fetch_failures.fetch_add(1, Ordering::SeqCst);
                tracing::warn!("Fetch failed for {}: {}", address, e);
                self.state
                    .reporter
                    .fetch_failed(&FailureRecord::new(depth, &e));
                TaskOutcome::FetchFailed
            }
        }
    }
}

/// Crawls from `seed` to `max_depth` and waits for completion
///
/// # Arguments
///
/// * `seed` - The starting address
/// * `max_depth` - Number of hop levels to fetch, counting the seed as one
/// * `fetcher` - The fetch capability
/// * `reporter` - Receives page records, failures, and the final summary
///
/// # Returns
///
/// The summary of the finished crawl
pub async fn run_crawl(
    seed: impl Into<String>,
    max_depth: u32,
    fetcher: Arc<dyn Fetcher>,
    reporter: Arc<dyn CrawlReporter>,
) -> CrawlSummary {
    let crawler = Crawler::new(reporter);
    crawler.crawl(seed, max_depth, fetcher);
    crawler.finish().await
}
