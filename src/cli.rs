//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Codebook - category aggregation and charts for literature-review coding sheets
///
/// Reads the coded excerpts of a systematic review, writes a per-category
/// summary CSV and renders bar charts for RQ1 and RQ2.
///
/// Examples:
///   codebook --input codes.csv
///   codebook --input codes.csv --pipeline charts --translate
///   codebook --input codes.csv --report run.md
///   codebook --input codes.csv --dry-run
///   codebook --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Input CSV with the coded excerpts
    ///
    /// Defaults to the path in .codebook.toml.
    #[arg(short, long, value_name = "FILE", env = "CODEBOOK_INPUT")]
    pub input: Option<PathBuf>,

    /// Output path for the category summary CSV
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory for the generated charts (created if missing)
    #[arg(long, value_name = "DIR")]
    pub charts_dir: Option<PathBuf>,

    /// Which pipeline to run
    #[arg(long, default_value = "all", value_name = "PIPELINE")]
    pub pipeline: Pipeline,

    /// Translate category labels to English on the charts
    #[arg(long, conflicts_with = "no_translate")]
    pub translate: bool,

    /// Keep the original category labels on the charts
    #[arg(long, conflicts_with = "translate")]
    pub no_translate: bool,

    /// Number of articles in the most-cited charts
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Write a run report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Run report format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .codebook.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and validate the input without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .codebook.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Which pipelines a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Pipeline {
    /// Category summary CSV only
    Aggregate,
    /// Charts only
    Charts,
    /// Both (default)
    #[default]
    All,
}

impl Pipeline {
    pub fn aggregates(&self) -> bool {
        matches!(self, Pipeline::Aggregate | Pipeline::All)
    }

    pub fn charts(&self) -> bool {
        matches!(self, Pipeline::Charts | Pipeline::All)
    }
}

/// Output format for the run report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if input.is_dir() {
                return Err(format!("Input path is a directory: {}", input.display()));
            }
        }

        if let Some(ref dir) = self.charts_dir {
            if dir.is_file() {
                return Err(format!(
                    "Charts directory is an existing file: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: Some(PathBuf::from("codes.csv")),
            output: None,
            charts_dir: None,
            pipeline: Pipeline::All,
            translate: false,
            no_translate: false,
            top: None,
            report: None,
            format: None,
            config: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["codebook", "--input", "codes.csv"]).unwrap();
        assert_eq!(args.pipeline, Pipeline::All);
        assert_eq!(args.input, Some(PathBuf::from("codes.csv")));
        assert!(!args.translate);
        assert!(args.format.is_none());
    }

    #[test]
    fn test_parse_pipeline_and_format() {
        let args = Args::try_parse_from([
            "codebook",
            "--pipeline",
            "charts",
            "--format",
            "json",
            "--top",
            "5",
        ])
        .unwrap();
        assert_eq!(args.pipeline, Pipeline::Charts);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.top, Some(5));
    }

    #[test]
    fn test_translate_flags_conflict() {
        let result = Args::try_parse_from(["codebook", "--translate", "--no-translate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pipeline_selection() {
        assert!(Pipeline::All.aggregates() && Pipeline::All.charts());
        assert!(Pipeline::Aggregate.aggregates() && !Pipeline::Aggregate.charts());
        assert!(!Pipeline::Charts.aggregates() && Pipeline::Charts.charts());
    }

    #[test]
    fn test_validation_zero_top() {
        let mut args = make_args();
        args.top = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
