//! Integration tests for the HTTP fetcher
//!
//! These tests use wiremock to create mock HTTP servers and crawl them
//! end-to-end.

use fanout_crawler::config::{FetcherConfig, UserAgentConfig};
use fanout_crawler::crawler::{run_crawl, Fetcher, HttpFetcher};
use fanout_crawler::output::MemoryReporter;
use fanout_crawler::FetchError;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    }
}

fn http_fetcher() -> HttpFetcher {
    HttpFetcher::new(&test_user_agent(), &FetcherConfig::default())
        .expect("Failed to build HTTP fetcher")
}

fn html_page(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_fetch_title_and_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{}/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            </body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    let page = http_fetcher()
        .fetch(&format!("{}/", base_url))
        .await
        .expect("fetch failed");

    assert_eq!(page.content, "Home");
    assert_eq!(
        page.links,
        vec![format!("{}/page1", base_url), format!("{}/page2", base_url)]
    );
}

#[tokio::test]
async fn test_fetch_without_title_uses_excerpt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(html_page(
            "<html><body><p>Just   some\ntext</p></body></html>".to_string(),
        ))
        .mount(&mock_server)
        .await;

    let page = http_fetcher()
        .fetch(&format!("{}/plain", mock_server.uri()))
        .await
        .expect("fetch failed");

    assert_eq!(page.content, "Just some text");
    assert!(page.links.is_empty());
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(html_page("<title>ok</title>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = http_fetcher()
        .fetch(&format!("{}/", mock_server.uri()))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_fetch_404_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let address = format!("{}/missing", mock_server.uri());
    let err = http_fetcher().fetch(&address).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(err.address(), address);
}

#[tokio::test]
async fn test_fetch_connection_refused_is_http_error() {
    // Port 9 (discard) is not expected to be listening locally
    let err = http_fetcher()
        .fetch("http://127.0.0.1:9/")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Http { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_http_crawl_fetches_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{0}/page1">Page 1</a>
            <a href="{0}/page2">Page 2</a>
            <a href="{0}/gone">Gone</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page(format!(
            r#"<html><head><title>Page 1</title></head><body>
            <a href="{0}/">Home</a><a href="{0}/page2">Page 2</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_page(format!(
            r#"<html><head><title>Page 2</title></head><body>
            <a href="{0}/page1">Page 1</a><a href="{0}/deep">Deep</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Linked only from depth 1, so it must never be requested with max depth 2
    Mock::given(method("GET"))
        .and(path("/deep"))
        .respond_with(html_page("<title>Deep</title>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let reporter = Arc::new(MemoryReporter::new());
    let summary = run_crawl(
        format!("{}/", base_url),
        2,
        Arc::new(http_fetcher()),
        reporter.clone(),
    )
    .await;

    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(summary.visited.len(), 4);
    assert!(!summary.visited.contains(&format!("{}/deep", base_url)));

    let failures = reporter.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].address, format!("{}/gone", base_url));

    mock_server.verify().await;
}
