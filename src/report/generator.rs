//! Markdown and JSON run report generation.
//!
//! This module renders a [`RunReport`] as a human-readable Markdown
//! document or as pretty-printed JSON.

use crate::models::{CategorySummary, LabelCount, QuestionStats, RunMetadata, RunReport};
use anyhow::{Context, Result};
use std::path::Path;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &RunReport) -> String {
    let mut output = String::new();

    output.push_str("# Codebook Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_categories_section(&report.summaries));

    for (name, stats) in [("RQ1", &report.rq1), ("RQ2", &report.rq2)] {
        if let Some(stats) = stats {
            output.push_str(&generate_question_section(name, stats));
        }
    }

    output.push_str(&generate_charts_section(&report.charts));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &RunMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Input:** `{}`\n", metadata.input));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Records Loaded:** {}\n",
        metadata.records_loaded
    ));
    section.push_str(&format!("- **Categories:** {}\n", metadata.categories));
    if metadata.discarded_rq_tokens > 0 {
        section.push_str(&format!(
            "- **Discarded RQ Tokens:** {}\n",
            metadata.discarded_rq_tokens
        ));
    }
    section.push_str(&format!(
        "- **Labels Translated:** {}\n",
        if metadata.translated { "yes" } else { "no" }
    ));
    section.push_str(&format!(
        "- **Duration:** {:.2}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Escape characters that would break a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Generate the category summary table.
fn generate_categories_section(summaries: &[CategorySummary]) -> String {
    if summaries.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Categories\n\n");
    section.push_str("| Category | Articles | RQs | Citations |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");

    for summary in summaries {
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            cell(&summary.category),
            summary.article_count,
            summary.rqs,
            summary.citation_count
        ));
    }
    section.push('\n');

    section
}

fn generate_count_table(header: &str, counts: &[LabelCount]) -> String {
    let mut table = String::new();

    table.push_str(&format!("| {} | Count |\n", header));
    table.push_str("|:---|:---:|\n");
    for entry in counts {
        table.push_str(&format!("| {} | {} |\n", cell(&entry.label), entry.count));
    }
    table.push('\n');

    table
}

/// Generate the distribution and ranking section for one research question.
fn generate_question_section(name: &str, stats: &QuestionStats) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", name));

    section.push_str("### Category Distribution\n\n");
    if stats.distribution.is_empty() {
        section.push_str("No categories coded.\n\n");
    } else {
        section.push_str(&generate_count_table("Category", &stats.distribution));
    }

    section.push_str("### Most Cited Articles\n\n");
    if stats.top_articles.is_empty() {
        section.push_str("No articles tagged.\n\n");
    } else {
        section.push_str(&generate_count_table("Article", &stats.top_articles));
    }

    section
}

/// Generate the list of chart files.
fn generate_charts_section(charts: &[String]) -> String {
    if charts.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Charts\n\n");
    for chart in charts {
        section.push_str(&format!("- `{}`\n", chart));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by codebook*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write rendered report content to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
