//! Frequency statistics feeding the charts.

use crate::models::{CodedRecord, LabelCount, ResearchQuestion};
use std::collections::HashMap;

/// Default number of articles kept in a top-cited ranking.
pub const DEFAULT_TOP_N: usize = 8;

/// Count occurrences of each label, keeping first-encounter order.
fn tally<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for label in labels {
        match index.get(label) {
            Some(&position) => counts[position].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(LabelCount::new(label, 1));
            }
        }
    }

    counts
}

/// Sort counts descending; equal counts keep their encounter order.
fn sort_descending(counts: &mut [LabelCount]) {
    counts.sort_by_key(|c| std::cmp::Reverse(c.count));
}

/// Frequency of each non-blank category label in one column, most frequent first.
pub fn category_distribution(records: &[CodedRecord], rq: ResearchQuestion) -> Vec<LabelCount> {
    let mut counts = tally(records.iter().filter_map(|r| r.trimmed_category(rq)));
    sort_descending(&mut counts);
    counts
}

/// Most frequently coded articles among records whose RQ list contains `marker`.
///
/// `marker` is matched as a substring of the raw `rqs` field. At most `n`
/// entries are returned.
pub fn top_cited_articles(records: &[CodedRecord], marker: &str, n: usize) -> Vec<LabelCount> {
    let articles = records
        .iter()
        .filter(|r| r.rqs.as_deref().is_some_and(|rqs| rqs.contains(marker)))
        .filter_map(|r| r.article.as_deref());

    let mut counts = tally(articles);
    sort_descending(&mut counts);
    counts.truncate(n);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(article: &str, rqs: &str, rq1: &str, rq2: &str) -> CodedRecord {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        CodedRecord {
            article: opt(article),
            rqs: opt(rqs),
            category_rq1: opt(rq1),
            category_rq2: opt(rq2),
            ..Default::default()
        }
    }

    fn labels(counts: &[LabelCount]) -> Vec<&str> {
        counts.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_tally_keeps_first_encounter_order() {
        let counts = tally(["b", "a", "b", "c", "a", "b"]);
        assert_eq!(
            counts,
            vec![
                LabelCount::new("b", 3),
                LabelCount::new("a", 2),
                LabelCount::new("c", 1)
            ]
        );
    }

    #[test]
    fn test_category_distribution() {
        let records = vec![
            record("A", "1", "Mediação", ""),
            record("B", "1", "Facilitação", ""),
            record("C", "1", " Facilitação", "Desafios de Foco"),
            record("D", "2", "", "Desafios de Foco"),
            record("E", "2", "  ", "Sobrecarga"),
        ];

        let rq1 = category_distribution(&records, ResearchQuestion::Rq1);
        assert_eq!(
            rq1,
            vec![
                LabelCount::new("Facilitação", 2),
                LabelCount::new("Mediação", 1)
            ]
        );

        let rq2 = category_distribution(&records, ResearchQuestion::Rq2);
        assert_eq!(labels(&rq2), vec!["Desafios de Foco", "Sobrecarga"]);
        assert_eq!(rq2[0].count, 2);
    }

    #[test]
    fn test_top_cited_filters_by_marker() {
        let records = vec![
            record("A", "1", "X", ""),
            record("B", "2", "", "Y"),
            record("B", "1, 2", "X", "Y"),
            record("C", "", "X", ""),
        ];

        let rq1 = top_cited_articles(&records, "1", DEFAULT_TOP_N);
        assert_eq!(
            rq1,
            vec![LabelCount::new("A", 1), LabelCount::new("B", 1)]
        );

        let rq2 = top_cited_articles(&records, "2", DEFAULT_TOP_N);
        assert_eq!(rq2, vec![LabelCount::new("B", 2)]);
    }

    #[test]
    fn test_top_cited_truncates_and_keeps_tie_order() {
        let mut records = Vec::new();
        for article in ["P", "Q", "R", "S"] {
            records.push(record(article, "1", "X", ""));
        }
        records.push(record("S", "1", "X", ""));

        let top = top_cited_articles(&records, "1", 3);
        assert_eq!(top.len(), 3);
        assert_eq!(labels(&top), vec!["S", "P", "Q"]);
    }

    #[test]
    fn test_top_cited_never_exceeds_n() {
        let records: Vec<CodedRecord> = (0..20)
            .map(|i| record(&format!("Art{}", i), "1", "X", ""))
            .collect();

        assert_eq!(top_cited_articles(&records, "1", DEFAULT_TOP_N).len(), 8);
        assert!(top_cited_articles(&records, "1", 0).is_empty());
        assert!(top_cited_articles(&records, "3", DEFAULT_TOP_N).is_empty());
    }
}
