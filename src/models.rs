//! Data models for the coding-sheet analysis.
//!
//! This module contains the core data structures used throughout
//! the application for representing coded records, category
//! summaries and run reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which research question a category column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchQuestion {
    /// RQ1 - how the practice is carried out
    Rq1,
    /// RQ2 - which challenges exist
    Rq2,
}

impl fmt::Display for ResearchQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResearchQuestion::Rq1 => write!(f, "RQ1"),
            ResearchQuestion::Rq2 => write!(f, "RQ2"),
        }
    }
}

impl ResearchQuestion {
    /// Both research questions, in report order.
    pub const ALL: [ResearchQuestion; 2] = [ResearchQuestion::Rq1, ResearchQuestion::Rq2];
}

/// One coded excerpt from the input sheet.
///
/// Every column is optional: an empty cell deserializes to `None`.
/// Which columns must be *present in the header* is checked separately by
/// [`crate::dataset::validate_headers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodedRecord {
    /// Free-text code identifier.
    #[serde(rename = "codigos", default)]
    pub code: Option<String>,
    /// Article reference, e.g. `Smith2020`.
    #[serde(rename = "artigo", default)]
    pub article: Option<String>,
    /// Comma-separated research question numbers, e.g. `"1, 2"`.
    #[serde(rename = "rqs", default)]
    pub rqs: Option<String>,
    /// Citation or quote reference inside the article.
    #[serde(rename = "referenciaDentroDoArtigo", default)]
    pub citation: Option<String>,
    #[serde(rename = "pagina", default)]
    pub page: Option<String>,
    #[serde(rename = "categoria_rq1", default)]
    pub category_rq1: Option<String>,
    #[serde(rename = "categoria_rq2", default)]
    pub category_rq2: Option<String>,
    #[serde(rename = "subcategoria", default)]
    pub subcategory: Option<String>,
}

impl CodedRecord {
    /// Returns the raw category label for the given research question.
    pub fn category(&self, rq: ResearchQuestion) -> Option<&str> {
        match rq {
            ResearchQuestion::Rq1 => self.category_rq1.as_deref(),
            ResearchQuestion::Rq2 => self.category_rq2.as_deref(),
        }
    }

    /// Returns the trimmed category label, or `None` when it is null or blank.
    pub fn trimmed_category(&self, rq: ResearchQuestion) -> Option<&str> {
        self.category(rq)
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

/// Aggregated statistics for one category label.
///
/// Serialized field names are the column headers of the summary CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(rename = "Categoria")]
    pub category: String,
    /// Number of distinct articles referencing the category.
    #[serde(rename = "Número de Artigos")]
    pub article_count: usize,
    /// Sorted, deduplicated RQ numbers joined with `", "`.
    #[serde(rename = "RQs")]
    pub rqs: String,
    /// Sorted, deduplicated article names joined with `", "`.
    #[serde(rename = "Artigos")]
    pub articles: String,
    /// Deduplicated citations in first-seen order joined with `" | "`.
    #[serde(rename = "Citações")]
    pub citations: String,
    /// Number of mentions of the category (not deduplicated).
    #[serde(rename = "Número de Citações")]
    pub citation_count: usize,
}

/// A labelled count, as fed to a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl LabelCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Metadata about a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Path of the input CSV.
    pub input: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records loaded from the input.
    pub records_loaded: usize,
    /// Number of distinct categories summarized.
    pub categories: usize,
    /// Number of non-numeric RQ tokens dropped during aggregation.
    pub discarded_rq_tokens: usize,
    /// Whether chart labels were translated.
    pub translated: bool,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

/// Distribution and ranking data for one research question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionStats {
    /// Category frequencies, most frequent first.
    pub distribution: Vec<LabelCount>,
    /// Most cited articles, most cited first.
    pub top_articles: Vec<LabelCount>,
}

/// The complete run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    /// Category summaries, empty when aggregation did not run.
    pub summaries: Vec<CategorySummary>,
    /// Statistics for RQ1, absent when charts did not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rq1: Option<QuestionStats>,
    /// Statistics for RQ2, absent when charts did not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rq2: Option<QuestionStats>,
    /// Chart files written during the run.
    pub charts: Vec<String>,
}
