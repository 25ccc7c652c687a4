//! Reading the coding sheet and writing the category summary.
//!
//! Rows are deserialized into [`CodedRecord`] with `csv` + `serde`. The header
//! row is validated against the columns a pipeline needs before any row is
//! read, so a missing column fails fast with the full list of what is absent.

use crate::models::{CategorySummary, CodedRecord};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Columns the category aggregation pipeline reads.
pub const AGGREGATION_COLUMNS: [&str; 8] = [
    "codigos",
    "artigo",
    "rqs",
    "referenciaDentroDoArtigo",
    "pagina",
    "categoria_rq2",
    "subcategoria",
    "categoria_rq1",
];

/// Columns the chart pipeline reads.
pub const CHART_COLUMNS: [&str; 4] = ["categoria_rq1", "categoria_rq2", "rqs", "artigo"];

/// Header row of the summary CSV, in output order.
pub const SUMMARY_HEADERS: [&str; 6] = [
    "Categoria",
    "Número de Artigos",
    "RQs",
    "Artigos",
    "Citações",
    "Número de Citações",
];

/// Errors raised while reading or writing tabular data.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("{} is missing required column(s): {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DatasetError {
    fn csv(path: &Path, source: csv::Error) -> Self {
        DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Returns the required columns absent from `headers`, in `required` order.
pub fn missing_columns<'a>(
    headers: impl IntoIterator<Item = &'a str>,
    required: &[&str],
) -> Vec<String> {
    let present: Vec<&str> = headers.into_iter().collect();

    required
        .iter()
        .filter(|column| !present.contains(*column))
        .map(|column| column.to_string())
        .collect()
}

/// Check a header row against the required columns.
pub fn validate_headers(
    path: &Path,
    headers: &csv::StringRecord,
    required: &[&str],
) -> Result<(), DatasetError> {
    let missing = missing_columns(headers.iter(), required);

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        })
    }
}

/// Load every record from a CSV file, validating the header first.
pub fn load_records(path: &Path, required: &[&str]) -> Result<Vec<CodedRecord>, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::csv(path, e))?
        .clone();
    debug!("Input columns: {:?}", headers);
    validate_headers(path, &headers, required)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<CodedRecord>() {
        records.push(row.map_err(|e| DatasetError::csv(path, e))?);
    }

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Serialize summaries as CSV into any writer.
///
/// The header row is always written, even when there are no summaries.
pub fn write_summaries_to<W: io::Write>(
    writer: W,
    summaries: &[CategorySummary],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(SUMMARY_HEADERS)?;
    for summary in summaries {
        csv_writer.serialize(summary)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write the summary CSV to a file, creating parent directories as needed.
pub fn write_summaries(path: &Path, summaries: &[CategorySummary]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    write_summaries_to(file, summaries).map_err(|e| DatasetError::csv(path, e))?;

    info!("Wrote {} category rows to {}", summaries.len(), path.display());
    Ok(())
}
