//! Integration tests for the crawl core
//!
//! These tests drive the crawler with the in-memory fixture fetcher and check
//! the at-most-once, depth and completion guarantees end-to-end.

use async_trait::async_trait;
use fanout_crawler::crawler::{run_crawl, tour_fixture, Crawler, Fetcher, Page, StaticFetcher};
use fanout_crawler::output::MemoryReporter;
use fanout_crawler::FetchError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn reporter() -> Arc<MemoryReporter> {
    Arc::new(MemoryReporter::new())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fixture_scenario() {
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_page("A", "page A", ["B", "C"])
            .with_page("B", "page B", ["A", "C"])
            .with_page("C", "page C", ["A"])
            .with_delay(Duration::from_millis(20)),
    );

    let summary = run_crawl("A", 2, fetcher.clone(), reporter()).await;

    assert_eq!(summary.visited, vec!["A", "B", "C"]);
    assert_eq!(fetcher.calls("A"), 1);
    assert_eq!(fetcher.calls("B"), 1);
    assert_eq!(fetcher.calls("C"), 1);
    assert_eq!(fetcher.total_calls(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_hundred_siblings_same_address_single_fetch() {
    let links = vec!["target"; 100];
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_page("hub", "hub", links)
            .with_page("target", "target", Vec::<String>::new())
            .with_delay(Duration::from_millis(5)),
    );

    let summary = run_crawl("hub", 3, fetcher.clone(), reporter()).await;

    assert_eq!(fetcher.calls("target"), 1);
    assert_eq!(summary.visited, vec!["hub", "target"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_hundred_branches_converge_single_fetch() {
    let mids: Vec<String> = (0..100).map(|i| format!("mid-{}", i)).collect();
    let mut fetcher = StaticFetcher::new().with_page("root", "root", mids.clone());
    for mid in &mids {
        fetcher = fetcher.with_page(mid, mid, ["shared", "root"]);
    }
    let fetcher = Arc::new(
        fetcher
            .with_page("shared", "shared", ["root"])
            .with_delay(Duration::from_millis(5)),
    );

    let summary = run_crawl("root", 4, fetcher.clone(), reporter()).await;

    assert_eq!(fetcher.calls("shared"), 1);
    assert_eq!(fetcher.calls("root"), 1);
    for mid in &mids {
        assert_eq!(fetcher.calls(mid), 1);
    }
    assert_eq!(summary.visited.len(), 102);
    assert_eq!(fetcher.total_calls(), 102);
}

#[tokio::test]
async fn test_depth_zero_no_fetch() {
    let fetcher = Arc::new(tour_fixture());
    let summary = run_crawl("https://golang.org/", 0, fetcher.clone(), reporter()).await;

    assert_eq!(fetcher.total_calls(), 0);
    assert!(summary.visited.is_empty());
}

#[tokio::test]
async fn test_depth_bounds_chain() {
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_page("1", "one", ["2"])
            .with_page("2", "two", ["3"])
            .with_page("3", "three", ["4"])
            .with_page("4", "four", ["5"])
            .with_page("5", "five", Vec::<String>::new()),
    );

    let summary = run_crawl("1", 3, fetcher.clone(), reporter()).await;

    assert_eq!(summary.visited, vec!["1", "2", "3"]);
    assert_eq!(fetcher.calls("4"), 0);
    assert_eq!(fetcher.calls("5"), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failure_is_local() {
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_page("seed", "seed", ["broken", "good"])
            .with_page("good", "good", ["leaf", "broken"])
            .with_page("leaf", "leaf", Vec::<String>::new())
            .with_delay(Duration::from_millis(10)),
    );
    let reporter = reporter();

    let summary = run_crawl("seed", 4, fetcher.clone(), reporter.clone()).await;

    assert_eq!(summary.visited, vec!["broken", "good", "leaf", "seed"]);
    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(summary.pages_fetched, 3);
    // Rediscovery from "good" must not retry the failed address
    assert_eq!(fetcher.calls("broken"), 1);

    let failures = reporter.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].error, "not found: broken");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tour_fixture_crawl() {
    let fetcher = Arc::new(tour_fixture().with_delay(Duration::from_millis(10)));
    let reporter = reporter();

    let summary = run_crawl("https://golang.org/", 4, fetcher.clone(), reporter.clone()).await;

    assert_eq!(
        summary.visited,
        vec![
            "https://golang.org/",
            "https://golang.org/cmd/",
            "https://golang.org/pkg/",
            "https://golang.org/pkg/fmt/",
            "https://golang.org/pkg/os/",
        ]
    );
    assert_eq!(summary.pages_fetched, 4);
    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(fetcher.total_calls(), 5);

    let seed_record = reporter
        .pages()
        .into_iter()
        .find(|p| p.address == "https://golang.org/")
        .expect("seed reported");
    assert_eq!(seed_record.depth, 4);
    assert_eq!(seed_record.snippet, "The Go Programming Language");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_wait_leaves_nothing_running() {
    let fetcher = Arc::new(tour_fixture().with_delay(Duration::from_millis(20)));
    let crawler = Crawler::new(reporter());

    crawler.crawl("https://golang.org/", 4, fetcher.clone());
    assert!(crawler.outstanding() >= 1);

    let visited_at_wait = crawler.wait().await;
    assert_eq!(crawler.outstanding(), 0);
    assert_eq!(visited_at_wait.len(), 5);

    let calls_at_wait = fetcher.total_calls();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(fetcher.total_calls(), calls_at_wait);
    assert_eq!(crawler.wait().await, visited_at_wait);
}

#[tokio::test]
async fn test_crawl_returns_before_completion() {
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_page("slow", "slow", Vec::<String>::new())
            .with_delay(Duration::from_millis(200)),
    );
    let crawler = Crawler::new(reporter());

    crawler.crawl("slow", 1, fetcher.clone());
    assert_eq!(crawler.outstanding(), 1);

    crawler.wait().await;
    assert_eq!(fetcher.calls("slow"), 1);
}

#[tokio::test]
async fn test_summary_reported_once_finished() {
    let reporter = reporter();
    let summary = run_crawl("https://golang.org/", 2, Arc::new(tour_fixture()), reporter.clone()).await;

    let reported = reporter.summary().expect("summary reported after completion");
    assert_eq!(reported.visited, summary.visited);
    assert!(reported.finished_at.is_some());
}

/// Fetcher that tracks how many fetches are in flight at once
struct OverlapFetcher {
    children: usize,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl OverlapFetcher {
    fn new(children: usize, delay: Duration) -> Self {
        Self {
            children,
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Fetcher for OverlapFetcher {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let links = if address == "root" {
            (0..self.children).map(|i| format!("child-{}", i)).collect()
        } else {
            Vec::new()
        };
        Ok(Page::new(address, links))
    }
}

#[tokio::test(start_paused = true)]
async fn test_sibling_fetches_run_concurrently() {
    let delay = Duration::from_millis(50);
    let fetcher = Arc::new(OverlapFetcher::new(50, delay));

    let start = tokio::time::Instant::now();
    let summary = run_crawl("root", 2, fetcher.clone(), reporter()).await;
    let elapsed = start.elapsed();

    assert_eq!(summary.pages_fetched, 51);
    assert_eq!(fetcher.peak.load(Ordering::SeqCst), 50);
    // Root, then all children side by side.
    assert!(elapsed < delay * 3, "fetches were serialized: {:?}", elapsed);
}
