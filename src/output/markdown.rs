//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a finished
//! crawl: run metadata, fetch statistics, and the visited addresses.

use crate::output::traits::{CrawlSummary, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of `summary` to `output_path`
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Fanout Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    for seed in &summary.seeds {
        md.push_str(&format!("- **Seed**: {}\n", seed));
    }
    md.push_str(&format!("- **Max Depth**: {}\n", summary.max_depth));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished));
    }
    if let Some(duration) = summary.duration_ms {
        md.push_str(&format!(
            "- **Duration**: {} ms ({:.2} seconds)\n",
            duration,
            duration as f64 / 1000.0
        ));
    }
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Visited | {} |\n", summary.visited.len()));
    md.push_str(&format!("| Pages Fetched | {} |\n", summary.pages_fetched));
    md.push_str(&format!("| Fetch Failures | {} |\n", summary.fetch_failures));
    md.push_str(&format!(
        "\n- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    // Visited addresses
    if !summary.visited.is_empty() {
        md.push_str("## Visited Addresses\n\n");
        for address in &summary.visited {
            md.push_str(&format!("- {}\n", address));
        }
        md.push('\n');
    }

    md
}
