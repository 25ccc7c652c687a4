//! Category aggregation.
//!
//! This module reshapes coded records into one mention per category column
//! and folds the mentions into per-category summaries.

use crate::models::{CategorySummary, CodedRecord, ResearchQuestion};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// A research question number, kept as its digits without leading zeros.
///
/// Numbers of any length are accepted; ordering is numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RqNumber(String);

impl Ord for RqNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for RqNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The merged set of research question numbers seen across many RQ lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RqAggregate {
    /// Distinct RQ numbers, ascending.
    pub rqs: BTreeSet<RqNumber>,
    /// Non-numeric tokens that were dropped.
    pub discarded: usize,
}

impl fmt::Display for RqAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .rqs
            .iter()
            .map(RqNumber::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// Merge comma-separated RQ lists such as `"1"`, `"2"` and `"1, 2"`.
///
/// Blank tokens are ignored. Tokens that are not plain non-negative integers
/// are dropped and counted in [`RqAggregate::discarded`].
pub fn aggregate_rqs<'a, I>(lists: I) -> RqAggregate
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut aggregate = RqAggregate::default();

    for list in lists.into_iter().flatten() {
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match parse_rq(token) {
                Some(rq) => {
                    aggregate.rqs.insert(rq);
                }
                None => aggregate.discarded += 1,
            }
        }
    }

    aggregate
}

fn parse_rq(token: &str) -> Option<RqNumber> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = token.trim_start_matches('0');
    Some(RqNumber(if digits.is_empty() { "0" } else { digits }.to_string()))
}

/// One record's contribution to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMention<'a> {
    /// Trimmed category label.
    pub category: &'a str,
    /// Column the label came from.
    pub source: ResearchQuestion,
    pub article: Option<&'a str>,
    pub rqs: Option<&'a str>,
    pub citation: Option<&'a str>,
    pub subcategory: Option<&'a str>,
}

/// Reshape records long-format: one mention per non-blank category column.
///
/// Mentions are column-major: every RQ1 mention in record order, then every
/// RQ2 mention. Citation order in the summaries follows this order.
pub fn reshape(records: &[CodedRecord]) -> Vec<CategoryMention<'_>> {
    ResearchQuestion::ALL
        .iter()
        .flat_map(move |&rq| {
            records.iter().filter_map(move |record| {
                record
                    .trimmed_category(rq)
                    .map(|category| CategoryMention {
                        category,
                        source: rq,
                        article: record.article.as_deref(),
                        rqs: record.rqs.as_deref(),
                        citation: record.citation.as_deref(),
                        subcategory: record.subcategory.as_deref(),
                    })
            })
        })
        .collect()
}

/// Result of summarizing a set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAnalysis {
    /// One row per category, sorted by label.
    pub summaries: Vec<CategorySummary>,
    /// Total non-numeric RQ tokens dropped across all categories.
    pub discarded_rq_tokens: usize,
}

/// Group mentions by category and compute the per-category summary rows.
pub fn summarize_categories(records: &[CodedRecord]) -> CategoryAnalysis {
    let mut grouped: BTreeMap<&str, Vec<CategoryMention<'_>>> = BTreeMap::new();

    for mention in reshape(records) {
        grouped.entry(mention.category).or_default().push(mention);
    }

    let mut analysis = CategoryAnalysis::default();

    for (category, mentions) in grouped {
        let rqs = aggregate_rqs(mentions.iter().map(|m| m.rqs));
        analysis.discarded_rq_tokens += rqs.discarded;

        let articles: BTreeSet<&str> = mentions.iter().filter_map(|m| m.article).collect();

        let mut citations: Vec<&str> = Vec::new();
        for citation in mentions.iter().filter_map(|m| m.citation) {
            if !citations.contains(&citation) {
                citations.push(citation);
            }
        }

        let subcategories: BTreeSet<&str> = mentions.iter().filter_map(|m| m.subcategory).collect();
        let from_rq1 = mentions
            .iter()
            .filter(|m| m.source == ResearchQuestion::Rq1)
            .count();
        debug!(
            "{}: {} mentions ({} from RQ1), {} subcategories",
            category,
            mentions.len(),
            from_rq1,
            subcategories.len()
        );

        analysis.summaries.push(CategorySummary {
            category: category.to_string(),
            article_count: articles.len(),
            rqs: rqs.to_string(),
            articles: articles.into_iter().collect::<Vec<_>>().join(", "),
            citations: citations.join(" | "),
            citation_count: mentions.len(),
        });
    }

    analysis
}
