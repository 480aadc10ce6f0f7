//! Fanout Crawler main entry point
//!
//! This is the command-line interface for the Fanout Crawler.

use clap::Parser;
use fanout_crawler::config::{load_config_with_hash, validate, Config, FetcherKind};
use fanout_crawler::crawler::crawl;
use fanout_crawler::output::ConsoleReporter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Fanout Crawler: a bounded-depth concurrent link crawler
///
/// Visits every link reachable from the seed within the depth budget, one
/// concurrent task per discovered link, fetching each address at most once.
/// Without a config file it crawls a built-in demo site map.
#[derive(Parser, Debug)]
#[command(name = "fanout-crawler")]
#[command(version)]
#[command(about = "A bounded-depth concurrent link crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the seed address
    #[arg(long)]
    seed: Option<String>,

    /// Override the maximum crawl depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    (cfg, Some(hash))
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration given, running the built-in demo");
            (Config::demo(), None)
        }
    };

    if let Some(seed) = cli.seed {
        config.crawler.seed = seed;
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, config_hash).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fanout_crawler=info,warn"),
            1 => EnvFilter::new("fanout_crawler=debug,info"),
            2 => EnvFilter::new("fanout_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Fanout Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Max depth: {}", config.crawler.max_depth);

    println!("\nFetcher:");
    match config.fetcher.kind {
        FetcherKind::Fixture => {
            println!("  Kind: fixture");
            println!("  Delay: {}ms", config.fetcher.delay_ms);
            if config.fixture.pages.is_empty() {
                println!("  Pages: built-in Go tour site map");
            } else {
                println!("  Pages: {}", config.fixture.pages.len());
            }
        }
        FetcherKind::Http => {
            println!("  Kind: http");
            println!("  Timeout: {}s", config.fetcher.timeout_secs);
            println!("  Connect timeout: {}s", config.fetcher.connect_timeout_secs);
            if let Some(user_agent) = &config.user_agent {
                println!("  User agent: {}", user_agent.header_value());
            }
        }
    }

    if let Some(path) = &config.output.summary_path {
        println!("\nOutput:");
        println!("  Summary: {}", path);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    config_hash: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl from {} (max depth {})",
        config.crawler.seed,
        config.crawler.max_depth
    );

    match crawl(&config, config_hash, Arc::new(ConsoleReporter::new())).await {
        Ok(summary) => {
            tracing::info!(
                "Success rate: {:.1}% ({} / {} fetches)",
                summary.success_rate(),
                summary.pages_fetched,
                summary.total_fetches()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
