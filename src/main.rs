//! Codebook - category aggregation and charts for literature-review coding sheets
//!
//! A CLI tool that loads the coded excerpts of a systematic review,
//! writes a per-category summary CSV and renders bar charts for
//! the two research questions.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing input, bad columns, write failure, etc.)

mod analysis;
mod charts;
mod cli;
mod config;
mod dataset;
mod models;
mod report;
mod translate;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use dataset::DatasetError;
use indicatif::{ProgressBar, ProgressStyle};
use models::{CodedRecord, ResearchQuestion, RunMetadata, RunReport};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use translate::Translator;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Codebook v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .codebook.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE_NAME);
    println!("   Edit it to customize paths, chart options and translations.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Columns the selected pipelines need, without duplicates.
fn required_columns(pipeline: cli::Pipeline) -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = Vec::new();

    if pipeline.aggregates() {
        columns.extend(dataset::AGGREGATION_COLUMNS);
    }
    if pipeline.charts() {
        for column in dataset::CHART_COLUMNS {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }

    columns
}

/// Run the selected pipelines. Returns the process exit code.
fn run(args: Args) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate().map_err(|e| anyhow!(e))?;

    let translator = Translator::builtin().with_overrides(&config.translation);
    debug!("Translation table has {} entries", translator.len());

    // Step 1: Load the coding sheet
    let input = PathBuf::from(&config.general.input);
    let columns = required_columns(args.pipeline);

    let records = match dataset::load_records(&input, &columns) {
        Ok(records) => records,
        Err(DatasetError::NotFound(path)) => {
            eprintln!("❌ Input file not found: {}", path.display());
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "📥 Loaded {} records from {}",
        records.len(),
        input.display()
    );

    if args.dry_run {
        return handle_dry_run(&records, &config, args.pipeline);
    }

    let mut run_report = RunReport {
        metadata: RunMetadata {
            input: input.display().to_string(),
            generated_at: Utc::now(),
            records_loaded: records.len(),
            categories: 0,
            discarded_rq_tokens: 0,
            translated: config.charts.translate,
            duration_seconds: 0.0,
        },
        summaries: Vec::new(),
        rq1: None,
        rq2: None,
        charts: Vec::new(),
    };

    // Step 2: Category aggregation
    if args.pipeline.aggregates() {
        run_aggregation(&records, &config, &mut run_report)?;
    }

    // Step 3: Charts
    if args.pipeline.charts() {
        run_charts(&records, &config, &translator, args.quiet, &mut run_report)?;
    }

    run_report.metadata.duration_seconds = start_time.elapsed().as_secs_f64();

    // Step 4: Optional run report
    if let Some(ref path) = config.report.path {
        let content = match config.report.format {
            OutputFormat::Json => report::generate_json_report(&run_report)?,
            OutputFormat::Markdown => report::generate_markdown_report(&run_report),
        };
        let path = PathBuf::from(path);
        report::write_report(&content, &path)?;
        println!("📝 Report saved to: {}", path.display());
    }

    println!(
        "\n✅ Done in {:.1}s.",
        run_report.metadata.duration_seconds
    );
    Ok(0)
}

/// Summarize categories and write the summary CSV.
fn run_aggregation(records: &[CodedRecord], config: &Config, report: &mut RunReport) -> Result<()> {
    println!("🧮 Aggregating categories...");

    let analysis = analysis::summarize_categories(records);
    if analysis.discarded_rq_tokens > 0 {
        warn!(
            "Discarded {} non-numeric RQ token(s) while aggregating",
            analysis.discarded_rq_tokens
        );
    }

    let output = PathBuf::from(&config.general.output);
    dataset::write_summaries(&output, &analysis.summaries)
        .with_context(|| format!("Failed to write summary to {}", output.display()))?;

    println!(
        "   {} categories written to {}",
        analysis.summaries.len(),
        output.display()
    );

    report.metadata.categories = analysis.summaries.len();
    report.metadata.discarded_rq_tokens = analysis.discarded_rq_tokens;
    report.summaries = analysis.summaries;
    Ok(())
}

/// Compute chart data and render every non-empty chart.
fn run_charts(
    records: &[CodedRecord],
    config: &Config,
    translator: &Translator,
    quiet: bool,
    report: &mut RunReport,
) -> Result<()> {
    println!("📊 Generating charts...");

    let records: Cow<'_, [CodedRecord]> = if config.charts.translate {
        info!("Translating category labels");
        Cow::Owned(translator.translate_records(records))
    } else {
        Cow::Borrowed(records)
    };

    let options = charts::ChartOptions::from(&config.charts);
    report.rq1 = Some(charts::question_stats(&records, ResearchQuestion::Rq1, &options));
    report.rq2 = Some(charts::question_stats(&records, ResearchQuestion::Rq2, &options));

    let specs = charts::plan_charts(&records, &options);
    let renderer = charts::ChartRenderer::new(
        PathBuf::from(&config.charts.output_dir),
        config.charts.width,
        config.charts.height,
    );
    renderer.ensure_output_dir()?;

    let progress = chart_progress(specs.len() as u64, quiet);
    for spec in &specs {
        progress.set_message(spec.kind.file_name());
        if let Some(path) = renderer.render(spec)? {
            report.charts.push(path.display().to_string());
        }
        progress.inc(1);
    }
    progress.finish_with_message("Charts complete");

    println!(
        "   {} chart(s) saved in {}",
        report.charts.len(),
        renderer.output_dir().display()
    );
    Ok(())
}

/// Progress bar over the charts, hidden in quiet mode.
fn chart_progress(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Handle --dry-run: report what would be produced, write nothing.
fn handle_dry_run(records: &[CodedRecord], config: &Config, pipeline: cli::Pipeline) -> Result<i32> {
    println!("\n🔍 Dry run: input validated, nothing will be written.\n");

    for rq in ResearchQuestion::ALL {
        let coded = records
            .iter()
            .filter(|r| r.trimmed_category(rq).is_some())
            .count();
        println!("   {} coded records: {}", rq, coded);
    }

    if pipeline.aggregates() {
        let analysis = analysis::summarize_categories(records);
        println!(
            "   Would write {} categories to {}",
            analysis.summaries.len(),
            config.general.output
        );
        if analysis.discarded_rq_tokens > 0 {
            println!(
                "   ⚠️  {} non-numeric RQ token(s) would be discarded",
                analysis.discarded_rq_tokens
            );
        }
    }

    if pipeline.charts() {
        println!("   Would render charts into {}", config.charts.output_dir);
    }

    println!("\n✅ Dry run complete.");
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const CODING_SHEET: &str = concat!(
        "\u{feff}codigos,artigo,rqs,referenciaDentroDoArtigo,pagina,categoria_rq2,subcategoria,categoria_rq1\n",
        "C1,Smith2020,1,q1,1,,Sub,Facilitação\n",
        "C2,Jones2021,\"1, 2\",q2,2,,Sub,Facilitação \n",
        "C3,Smith2020,2,q3,3,Desafios de Foco,,\n",
    );

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("codebook.toml"), "").unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn args(&self, input: &str, pipeline: &str) -> Args {
            let path = |name: &str| self.path(name).display().to_string();
            Args::try_parse_from([
                "codebook".to_string(),
                "--config".to_string(),
                path("codebook.toml"),
                "--input".to_string(),
                path(input),
                "--output".to_string(),
                path("summary.csv"),
                "--charts-dir".to_string(),
                path("charts"),
                "--pipeline".to_string(),
                pipeline.to_string(),
                "--quiet".to_string(),
            ])
            .unwrap()
        }
    }

    #[test]
    fn test_required_columns() {
        assert_eq!(required_columns(cli::Pipeline::Charts), dataset::CHART_COLUMNS);
        assert_eq!(
            required_columns(cli::Pipeline::Aggregate),
            dataset::AGGREGATION_COLUMNS
        );

        let all = required_columns(cli::Pipeline::All);
        assert_eq!(all.len(), dataset::AGGREGATION_COLUMNS.len());
    }

    #[test]
    fn test_aggregation_run_writes_summary() {
        let workspace = Workspace::new();
        fs::write(workspace.path("codes.csv"), CODING_SHEET).unwrap();

        let code = run(workspace.args("codes.csv", "aggregate")).unwrap();
        assert_eq!(code, 0);

        let summary = fs::read_to_string(workspace.path("summary.csv")).unwrap();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Categoria,Número de Artigos,RQs,Artigos,Citações,Número de Citações",
                "Desafios de Foco,1,2,Smith2020,q3,1",
                "Facilitação,2,\"1, 2\",\"Jones2021, Smith2020\",q1 | q2,2",
            ]
        );
        assert!(!workspace.path("charts").exists());
    }

    #[test]
    fn test_missing_input_exits_with_one() {
        let workspace = Workspace::new();

        let code = run(workspace.args("absent.csv", "all")).unwrap();
        assert_eq!(code, 1);
        assert!(!workspace.path("summary.csv").exists());
        assert!(!workspace.path("charts").exists());
    }
}
