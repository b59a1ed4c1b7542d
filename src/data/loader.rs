use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use super::model::{Dataset, MeasurementRow};
use crate::config::{DEFAULT_FILE_GLOB, FILE_TIME_FORMAT, SOURCE_PRESSURE_COLUMN, TIME_COLUMN};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a load failed. Row numbers count data rows from 1 (header excluded).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no files match '{pattern}'")]
    NoFilesMatched { pattern: String },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {} as CSV: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: missing column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error(
        "{} row {row}: time '{value}' does not match MM/DD/YYYY HH:MM:SS AM/PM",
        .path.display()
    )]
    TimeFormat {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("{} row {row}: '{value}' in column '{column}' is not a number", .path.display())]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },
}

impl LoadError {
    /// Cell-level format problems, as opposed to missing/unreadable files.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            LoadError::TimeFormat { .. } | LoadError::InvalidNumber { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and concatenate every file matched by `pattern`.
///
/// Fails as a whole if nothing matches or if any single file is unreadable,
/// lacks the time/pressure columns, or has a malformed timestamp.
pub fn load(pattern: &str) -> Result<Dataset, LoadError> {
    let files = resolve_pattern(pattern);
    if files.is_empty() {
        return Err(LoadError::NoFilesMatched {
            pattern: pattern.to_string(),
        });
    }

    let mut dataset = Dataset::default();
    for path in &files {
        let part = load_file(path)?;
        log::debug!("{}: {} rows", path.display(), part.len());
        dataset.extend(part);
    }
    log::info!(
        "Loaded {} rows from {} file(s) matching '{pattern}'",
        dataset.len(),
        files.len()
    );
    Ok(dataset)
}

/// Response columns of the first file matched by `directory` (a directory or pattern).
///
/// Empty when nothing matches; an unreadable first file is logged and also yields
/// an empty list.
pub fn discover_y_columns(directory: &str) -> Vec<String> {
    let Some(first) = resolve_pattern(directory).into_iter().next() else {
        return Vec::new();
    };
    match read_headers(&first) {
        Ok(headers) => headers
            .into_iter()
            .filter(|h| h != TIME_COLUMN && h != SOURCE_PRESSURE_COLUMN)
            .collect(),
        Err(e) => {
            log::warn!("Could not read columns: {e}");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern resolution
// ---------------------------------------------------------------------------

/// Expand `pattern` into matching file paths, sorted.
///
/// * an existing directory means `<dir>/*.csv`
/// * otherwise `pattern` is a glob (`*`, `?`, `[...]`, `**`) and may put
///   wildcards in any path component; a literal path names a single file
///
/// Hidden files only match a component that starts with a literal `.`.
pub fn resolve_pattern(pattern: &str) -> Vec<PathBuf> {
    let path = Path::new(pattern);
    let pattern = if path.is_dir() {
        Path::new(&glob::Pattern::escape(pattern))
            .join(DEFAULT_FILE_GLOB)
            .to_string_lossy()
            .into_owned()
    } else {
        pattern.to_string()
    };

    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    let entries = match glob::glob_with(&pattern, options) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("invalid file pattern '{pattern}': {e}");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::debug!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

fn open_csv(path: &Path) -> Result<csv::Reader<BufReader<File>>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(BufReader::new(file)))
}

/// Header row of a single file.
pub fn read_headers(path: &Path) -> Result<Vec<String>, LoadError> {
    let mut reader = open_csv(path)?;
    let headers = reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(headers.iter().map(|h| h.to_string()).collect())
}

/// CSV layout: header row with a `Time` column, a `Source Pressure (mBar)`
/// column, and any number of numeric response columns.
fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = open_csv(path)?;
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let time_idx = column_index(TIME_COLUMN)?;
    let pressure_idx = column_index(SOURCE_PRESSURE_COLUMN)?;

    let response_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != time_idx && *i != pressure_idx)
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row_no = i + 1;
        let record = result.map_err(csv_err)?;

        let time_text = record.get(time_idx).unwrap_or("");
        let timestamp = NaiveDateTime::parse_from_str(time_text, FILE_TIME_FORMAT).map_err(
            |_| LoadError::TimeFormat {
                path: path.to_path_buf(),
                row: row_no,
                value: time_text.to_string(),
            },
        )?;

        let pressure_text = record.get(pressure_idx).unwrap_or("");
        let source_pressure =
            parse_number(pressure_text).ok_or_else(|| LoadError::InvalidNumber {
                path: path.to_path_buf(),
                row: row_no,
                column: SOURCE_PRESSURE_COLUMN.to_string(),
                value: pressure_text.to_string(),
            })?;

        let values: BTreeMap<String, f64> = response_cols
            .iter()
            .map(|(idx, name)| {
                let value = record
                    .get(*idx)
                    .and_then(parse_number)
                    .unwrap_or(f64::NAN);
                (name.clone(), value)
            })
            .collect();

        rows.push(MeasurementRow {
            timestamp,
            source_pressure,
            values,
        });
    }

    Ok(Dataset {
        rows,
        columns: response_cols.into_iter().map(|(_, name)| name).collect(),
    })
}

/// Numeric cell; an empty cell is a missing value (`NaN`).
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(f64::NAN);
    }
    s.parse::<f64>().ok()
}
