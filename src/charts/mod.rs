//! Chart planning.
//!
//! This module decides *what* is plotted: which records feed which chart,
//! in which order, with which titles. Drawing lives in [`render`].

pub mod render;

use crate::analysis::{category_distribution, top_cited_articles};
use crate::models::{CodedRecord, LabelCount, QuestionStats, ResearchQuestion};

pub use render::ChartRenderer;

/// Colour ramp applied across the bars of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Dark purple for the first bar through to yellow for the last.
    Viridis,
    /// The same ramp, reversed.
    ViridisReversed,
}

/// What a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    CategoryDistribution(ResearchQuestion),
    TopCitedArticles(ResearchQuestion),
}

impl ChartKind {
    /// Output file name, fixed per chart.
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::CategoryDistribution(ResearchQuestion::Rq1) => {
                "distribuicao_categorias_rq1.png"
            }
            ChartKind::CategoryDistribution(ResearchQuestion::Rq2) => {
                "categorias_bardin_por_rq2.png"
            }
            ChartKind::TopCitedArticles(ResearchQuestion::Rq1) => "artigos_mais_citados_rq1.png",
            ChartKind::TopCitedArticles(ResearchQuestion::Rq2) => "artigos_mais_citados_rq2.png",
        }
    }

    /// Chart caption, in English when labels are translated.
    pub fn title(&self, english: bool) -> &'static str {
        match (self, english) {
            (ChartKind::CategoryDistribution(ResearchQuestion::Rq1), false) => {
                "Distribuição das Categorias para RQ1 (Como são feitas)"
            }
            (ChartKind::CategoryDistribution(ResearchQuestion::Rq1), true) => {
                "Category Distribution for RQ1 (How it is done)"
            }
            (ChartKind::CategoryDistribution(ResearchQuestion::Rq2), false) => {
                "Categorias de Bardin para RQ2 (Desafios)"
            }
            (ChartKind::CategoryDistribution(ResearchQuestion::Rq2), true) => {
                "Bardin Categories for RQ2 (Challenges)"
            }
            (ChartKind::TopCitedArticles(ResearchQuestion::Rq1), false) => {
                "RQ1: Artigos mais Citados"
            }
            (ChartKind::TopCitedArticles(ResearchQuestion::Rq1), true) => {
                "RQ1: Most Cited Articles"
            }
            (ChartKind::TopCitedArticles(ResearchQuestion::Rq2), false) => {
                "RQ2: Artigos mais Citados"
            }
            (ChartKind::TopCitedArticles(ResearchQuestion::Rq2), true) => {
                "RQ2: Most Cited Articles"
            }
        }
    }

    fn palette(&self) -> Palette {
        match self {
            ChartKind::CategoryDistribution(ResearchQuestion::Rq1)
            | ChartKind::TopCitedArticles(ResearchQuestion::Rq1) => Palette::Viridis,
            ChartKind::CategoryDistribution(ResearchQuestion::Rq2)
            | ChartKind::TopCitedArticles(ResearchQuestion::Rq2) => Palette::ViridisReversed,
        }
    }
}

/// A fully prepared bar chart: sorted, filtered and truncated data plus labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Caption of the value axis.
    pub value_label: String,
    /// Bars in display order, the first one drawn at the top.
    pub bars: Vec<LabelCount>,
    pub palette: Palette,
}

/// Options that shape the chart data.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Number of articles in each top-cited chart.
    pub top_n: usize,
    /// Substring marking a record as belonging to RQ1.
    pub rq1_marker: String,
    /// Substring marking a record as belonging to RQ2.
    pub rq2_marker: String,
    /// Use English captions.
    pub english: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            top_n: crate::analysis::DEFAULT_TOP_N,
            rq1_marker: "1".to_string(),
            rq2_marker: "2".to_string(),
            english: false,
        }
    }
}

impl From<&crate::config::ChartsConfig> for ChartOptions {
    fn from(config: &crate::config::ChartsConfig) -> Self {
        Self {
            top_n: config.top_n,
            rq1_marker: config.rq1_marker.clone(),
            rq2_marker: config.rq2_marker.clone(),
            english: config.translate,
        }
    }
}

impl ChartOptions {
    fn marker(&self, rq: ResearchQuestion) -> &str {
        match rq {
            ResearchQuestion::Rq1 => &self.rq1_marker,
            ResearchQuestion::Rq2 => &self.rq2_marker,
        }
    }

    fn value_label(&self) -> &'static str {
        if self.english {
            "Number of Codes"
        } else {
            "Número de Códigos"
        }
    }
}

/// Compute distribution and ranking data for one research question.
pub fn question_stats(
    records: &[CodedRecord],
    rq: ResearchQuestion,
    options: &ChartOptions,
) -> QuestionStats {
    QuestionStats {
        distribution: category_distribution(records, rq),
        top_articles: top_cited_articles(records, options.marker(rq), options.top_n),
    }
}

/// Build the four charts: category distribution and top-cited articles, per RQ.
pub fn plan_charts(records: &[CodedRecord], options: &ChartOptions) -> Vec<ChartSpec> {
    let mut charts = Vec::with_capacity(4);

    for rq in ResearchQuestion::ALL {
        let stats = question_stats(records, rq, options);
        charts.push(chart(
            ChartKind::CategoryDistribution(rq),
            stats.distribution,
            options,
        ));
        charts.push(chart(
            ChartKind::TopCitedArticles(rq),
            stats.top_articles,
            options,
        ));
    }

    // Distributions first, then the rankings.
    charts.sort_by_key(|c| matches!(c.kind, ChartKind::TopCitedArticles(_)));
    charts
}

fn chart(kind: ChartKind, bars: Vec<LabelCount>, options: &ChartOptions) -> ChartSpec {
    ChartSpec {
        kind,
        title: kind.title(options.english).to_string(),
        value_label: options.value_label().to_string(),
        bars,
        palette: kind.palette(),
    }
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

    fn sample() -> Vec<CodedRecord> {
        vec![
            record("Smith2020", "1", "Facilitação", ""),
            record("Jones2021", "1, 2", "Facilitação", ""),
            record("Smith2020", "2", "", "Desafios de Foco"),
            record("Lee2019", "1", "Mediação", ""),
        ]
    }

    #[test]
    fn test_plan_charts_order_and_files() {
        let charts = plan_charts(&sample(), &ChartOptions::default());

        let files: Vec<&str> = charts.iter().map(|c| c.kind.file_name()).collect();
        assert_eq!(
            files,
            vec![
                "distribuicao_categorias_rq1.png",
                "categorias_bardin_por_rq2.png",
                "artigos_mais_citados_rq1.png",
                "artigos_mais_citados_rq2.png",
            ]
        );
    }

    #[test]
    fn test_plan_charts_data() {
        let charts = plan_charts(&sample(), &ChartOptions::default());

        assert_eq!(
            charts[0].bars,
            vec![
                LabelCount::new("Facilitação", 2),
                LabelCount::new("Mediação", 1)
            ]
        );
        assert_eq!(charts[1].bars, vec![LabelCount::new("Desafios de Foco", 1)]);
        assert_eq!(charts[2].bars[0], LabelCount::new("Smith2020", 1));
        assert_eq!(charts[2].bars.len(), 3);
        assert_eq!(
            charts[3].bars,
            vec![
                LabelCount::new("Jones2021", 1),
                LabelCount::new("Smith2020", 1)
            ]
        );
    }

    #[test]
    fn test_plan_charts_respects_top_n() {
        let options = ChartOptions {
            top_n: 1,
            ..Default::default()
        };
        let charts = plan_charts(&sample(), &options);

        assert!(charts
            .iter()
            .filter(|c| matches!(c.kind, ChartKind::TopCitedArticles(_)))
            .all(|c| c.bars.len() <= 1));
    }

    #[test]
    fn test_captions_follow_language() {
        let english = ChartOptions {
            english: true,
            ..Default::default()
        };
        let charts = plan_charts(&sample(), &english);
        assert_eq!(charts[2].title, "RQ1: Most Cited Articles");
        assert_eq!(charts[0].value_label, "Number of Codes");

        let charts = plan_charts(&sample(), &ChartOptions::default());
        assert_eq!(charts[1].title, "Categorias de Bardin para RQ2 (Desafios)");
        assert_eq!(charts[1].palette, Palette::ViridisReversed);
    }
}
