//! Fetcher capability and the HTTP implementation
//!
//! The crawl core only ever sees [`Fetcher`]: given an address, return the
//! page content and the addresses it links to, or fail. The crawler calls it
//! concurrently for different addresses and never twice for the same one, and
//! adds no synchronization of its own around the call.

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::crawler::parser::parse_html;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Successful fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page content (body, title, or text excerpt depending on the fetcher)
    pub content: String,

    /// Outbound addresses, in document order
    pub links: Vec<String>,
}

impl Page {
    /// Creates a page from its content and outbound links
    pub fn new(content: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            content: content.into(),
            links,
        }
    }
}

/// Capability to fetch a single address
///
/// Implementations must be safe to call concurrently for different addresses.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `address`, returning its content and outbound links
    async fn fetch(&self, address: &str) -> Result<Page, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent identification
/// * `fetcher` - Timeout settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a real HTTP client
///
/// The page content is its `<title>`, or an excerpt of the body text when the
/// page has no title. Links are taken from anchors and canonical links,
/// resolved against the final URL after redirects.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from configuration
    pub fn new(
        user_agent: &UserAgentConfig,
        fetcher: &FetcherConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, fetcher)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        let url = Url::parse(address).map_err(|e| FetchError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(FetchError::InvalidAddress {
                address: address.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                address: address.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                address: address.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| FetchError::Http {
            address: address.to_string(),
            source,
        })?;

        let parsed = parse_html(&body, &final_url);
        let content = parsed.title.unwrap_or(parsed.excerpt);

        Ok(Page::new(content, parsed.links))
    }
}
