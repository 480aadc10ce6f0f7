use serde::Deserialize;

/// Main configuration structure for Fanout Crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<UserAgentConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub fixture: FixtureConfig,
}

impl Config {
    /// Configuration for the built-in demo: the Go tour fixture from its
    /// front page, four levels deep
    pub fn demo() -> Self {
        Self {
            crawler: CrawlerConfig {
                seed: "https://golang.org/".to_string(),
                max_depth: 4,
            },
            fetcher: FetcherConfig {
                delay_ms: 500,
                ..FetcherConfig::default()
            },
            user_agent: None,
            output: OutputConfig::default(),
            fixture: FixtureConfig::default(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Address the crawl starts from
    pub seed: String,

    /// Number of hop levels to fetch, counting the seed as the first
    #[serde(rename = "max-depth")]
    pub max_depth: u32,
}

/// Which fetcher implementation to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Canned in-memory pages
    #[default]
    Fixture,

    /// Real HTTP requests
    Http,
}

/// Fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    #[serde(default)]
    pub kind: FetcherKind,

    /// Artificial latency per fixture fetch (milliseconds)
    #[serde(rename = "delay-ms", default)]
    pub delay_ms: u64,

    /// Whole-request timeout for HTTP fetches (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout for HTTP fetches (seconds)
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            kind: FetcherKind::default(),
            delay_ms: 0,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown summary file, if one should be written
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

/// Canned pages for the fixture fetcher
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureConfig {
    #[serde(default)]
    pub pages: Vec<FixtureEntry>,
}

/// One canned page
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureEntry {
    pub address: String,
    pub body: String,
    #[serde(default)]
    pub links: Vec<String>,
}
