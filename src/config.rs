//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.codebook.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".codebook.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Chart settings.
    #[serde(default)]
    pub charts: ChartsConfig,

    /// Extra label translations, layered over the built-in table.
    #[serde(default)]
    pub translation: BTreeMap<String, String>,

    /// Run report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Input CSV path.
    #[serde(default = "default_input")]
    pub input: String,

    /// Category summary CSV path.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

fn default_input() -> String {
    "scopus_categorias_atualizadas_rq1_final.csv".to_string()
}

fn default_output() -> String {
    "analise_categorias.csv".to_string()
}

/// Chart generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Directory the PNG files are written to.
    #[serde(default = "default_charts_dir")]
    pub output_dir: String,

    /// Number of articles in the top-cited charts.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Translate category labels to English before plotting.
    #[serde(default)]
    pub translate: bool,

    /// Substring of the `rqs` column that selects RQ1 records.
    #[serde(default = "default_rq1_marker")]
    pub rq1_marker: String,

    /// Substring of the `rqs` column that selects RQ2 records.
    #[serde(default = "default_rq2_marker")]
    pub rq2_marker: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_charts_dir(),
            top_n: default_top_n(),
            width: default_width(),
            height: default_height(),
            translate: false,
            rq1_marker: default_rq1_marker(),
            rq2_marker: default_rq2_marker(),
        }
    }
}

fn default_charts_dir() -> String {
    "graficos_gerados".to_string()
}

fn default_top_n() -> usize {
    crate::analysis::DEFAULT_TOP_N
}

fn default_width() -> u32 {
    1400
}

fn default_height() -> u32 {
    800
}

fn default_rq1_marker() -> String {
    "1".to_string()
}

fn default_rq2_marker() -> String {
    "2".to_string()
}

/// Run report settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Where to write the report; no report when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Report format.
    #[serde(default)]
    pub format: crate::cli::OutputFormat,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.general.input = input.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(ref dir) = args.charts_dir {
            self.charts.output_dir = dir.display().to_string();
        }
        if let Some(top) = args.top {
            self.charts.top_n = top;
        }

        if args.translate {
            self.charts.translate = true;
        } else if args.no_translate {
            self.charts.translate = false;
        }

        if let Some(ref report) = args.report {
            self.report.path = Some(report.display().to_string());
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// Check values the CLI cannot validate on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.charts.top_n == 0 {
            return Err("charts.top_n must be at least 1".to_string());
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err("Chart width and height must be positive".to_string());
        }
        if self.charts.rq1_marker.is_empty() || self.charts.rq2_marker.is_empty() {
            return Err("RQ markers must not be empty".to_string());
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "analise_categorias.csv");
        assert_eq!(config.charts.output_dir, "graficos_gerados");
        assert_eq!(config.charts.top_n, 8);
        assert!(!config.charts.translate);
        assert!(config.translation.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
input = "codes.csv"

[charts]
output_dir = "out/charts"
top_n = 5
translate = true

[translation]
"Mediação" = "Brokering"

[report]
path = "run.json"
format = "json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.input, "codes.csv");
        assert_eq!(config.general.output, "analise_categorias.csv");
        assert_eq!(config.charts.output_dir, "out/charts");
        assert_eq!(config.charts.top_n, 5);
        assert!(config.charts.translate);
        assert_eq!(config.charts.width, 1400);
        assert_eq!(
            config.translation.get("Mediação").map(String::as_str),
            Some("Brokering")
        );
        assert_eq!(config.report.path.as_deref(), Some("run.json"));
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_rejects_zero_top_n() {
        let mut config = Config::default();
        config.charts.top_n = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[charts]"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.charts.top_n, 8);
    }
}
