//! Flat-file history store.
//!
//! The history is a plain text file with one record per line:
//!
//! ```text
//! limite:2000.0kcal, Consumo:1800.0 kcal
//! ```
//!
//! Reading is lenient: any line that contains exactly two decimal numbers is
//! accepted, the first being the limit and the second the consumption. Every
//! other line is dropped without complaint. Writing is append-only.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::record::Record;

/// Default history file name, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "registro_calorias.txt";

/// Unsigned decimal: digits, an optional point, more digits.
///
/// ASCII digits only: other Unicode digits would match `\d` but not parse as
/// `f64`.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("valid number regex"));

/// Errors raised by the history store.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to write history file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("refusing to write non-finite record (limit {limit}, consumption {consumption})")]
    NonFinite { limit: f64, consumption: f64 },
}

/// How a history read ended.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    /// The whole file was read.
    Loaded,
    /// No history file exists yet. Not an error.
    Missing,
    /// Reading stopped early. Records read before the failure are kept.
    Failed(String),
}

/// Records recovered from the history file plus the read status.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryLoad {
    pub records: Vec<Record>,
    pub status: LoadStatus,
}

impl HistoryLoad {
    fn missing() -> Self {
        Self {
            records: Vec::new(),
            status: LoadStatus::Missing,
        }
    }
}

/// Extract a [`Record`] from one history line.
///
/// Returns `None` unless the line contains exactly two numbers.
pub fn parse_line(line: &str) -> Option<Record> {
    let mut numbers = NUMBER.find_iter(line);
    let limit = numbers.next()?;
    let consumption = numbers.next()?;
    if numbers.next().is_some() {
        return None;
    }
    Some(Record::new(
        limit.as_str().parse().ok()?,
        consumption.as_str().parse().ok()?,
    ))
}

/// Render a record as a history line, including the trailing newline.
pub fn format_line(record: &Record) -> String {
    format!(
        "limite:{}kcal, Consumo:{} kcal\n",
        format_kcal(record.limit),
        format_kcal(record.consumption)
    )
}

/// Format a value so [`parse_line`] recovers it exactly.
///
/// Integral values keep one decimal (`2000.0`). `Display` for `f64` never
/// switches to exponent notation, which the number pattern cannot read.
fn format_kcal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Read the whole history at `path`.
///
/// A missing file yields an empty history with [`LoadStatus::Missing`]. An I/O
/// failure part way through yields [`LoadStatus::Failed`] together with the
/// records read so far.
pub fn read_history(path: &Path) -> HistoryLoad {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No history file at {}", path.display());
            return HistoryLoad::missing();
        }
        Err(e) => {
            warn!("Failed to open history {}: {e}", path.display());
            return HistoryLoad {
                records: Vec::new(),
                status: LoadStatus::Failed(e.to_string()),
            };
        }
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => match parse_line(&line) {
                Some(record) => records.push(record),
                None => skipped += 1,
            },
            Err(e) => {
                warn!(
                    "History read of {} stopped after {} records: {e}",
                    path.display(),
                    records.len()
                );
                return HistoryLoad {
                    records,
                    status: LoadStatus::Failed(e.to_string()),
                };
            }
        }
    }

    debug!(records = records.len(), skipped, "History loaded");
    HistoryLoad {
        records,
        status: LoadStatus::Loaded,
    }
}

/// Append one record to the history at `path`, creating the file if needed.
///
/// The line is written with a single `write_all` so that concurrent
/// appenders interleave whole lines.
///
/// Non-finite values are refused: they would produce a line the reader drops.
pub fn append_record(path: &Path, limit: f64, consumption: f64) -> Result<Record, HistoryError> {
    if !limit.is_finite() || !consumption.is_finite() {
        return Err(HistoryError::NonFinite { limit, consumption });
    }
    let record = Record::new(limit, consumption);
    let line = format_line(&record);

    let write_err = |source| HistoryError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(line.as_bytes()).map_err(write_err)?;

    info!(limit, consumption, "Record appended to {}", path.display());
    Ok(record)
}
