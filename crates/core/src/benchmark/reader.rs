//! Benchmark log reader and aggregation
//!
//! Malformed rows are skipped one at a time and reported alongside the
//! parsed records; a bad row never aborts the read.

use super::record::{BenchmarkRecord, RowError, LOG_HEADER};
use crate::error::{FireSimError, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// A row that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-indexed line number in the log
    pub line_number: usize,
    /// Parse failure
    pub error: RowError,
}

/// Parsed contents of a benchmark log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogReadout {
    /// Valid records in file order
    pub records: Vec<BenchmarkRecord>,
    /// Rows that were skipped
    pub skipped: Vec<SkippedRow>,
}

/// Mean timing for one `(language, size)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    /// Producer language
    pub language: String,
    /// Grid side length
    pub size: usize,
    /// Number of runs averaged
    pub runs: usize,
    /// Mean elapsed seconds
    pub mean_seconds: f64,
    /// Fastest run in seconds
    pub min_seconds: f64,
}

/// Parse log text
///
/// Blank lines and header lines are ignored; every other line is parsed as
/// a record.
pub fn parse_log(contents: &str) -> LogReadout {
    let mut readout = LogReadout::default();
    for (idx, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == LOG_HEADER {
            continue;
        }
        match BenchmarkRecord::parse_line(trimmed) {
            Ok(record) => readout.records.push(record),
            Err(error) => {
                warn!("Skipping benchmark log line {}: {}", idx + 1, error);
                readout.skipped.push(SkippedRow {
                    line_number: idx + 1,
                    error,
                });
            }
        }
    }
    readout
}

/// Read and parse the log at `path`
///
/// # Errors
///
/// Returns [`FireSimError::Io`] if the file cannot be read. Malformed rows
/// are not errors; see [`LogReadout::skipped`].
pub fn read_log<P: AsRef<Path>>(path: P) -> Result<LogReadout> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| FireSimError::io(path, e))?;
    Ok(parse_log(&contents))
}

/// Average run times per `(language, size)`, sorted by language then size
pub fn aggregate(records: &[BenchmarkRecord]) -> Vec<AggregateRow> {
    let mut groups: FxHashMap<(&str, usize), Vec<f64>> = FxHashMap::default();
    for record in records {
        groups
            .entry((record.language.as_str(), record.size))
            .or_default()
            .push(record.time_seconds);
    }

    let mut rows: Vec<AggregateRow> = groups
        .into_iter()
        .map(|((language, size), times)| {
            let runs = times.len();
            let mean_seconds = times.iter().sum::<f64>() / runs as f64;
            let min_seconds = times.iter().copied().fold(f64::INFINITY, f64::min);
            AggregateRow {
                language: language.to_string(),
                size,
                runs,
                mean_seconds,
                min_seconds,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.language.cmp(&b.language).then(a.size.cmp(&b.size)));
    rows
}
