//! Benchmark log record format
//!
//! One comma-separated line per run: `Language,Size,Steps,TimeSeconds`.
//! Records written by this crate always carry all four fields. Historical
//! three-field rows (`Language,Size,TimeSeconds`) are still accepted when
//! parsing, with `steps` left as `None`.

use crate::simulation::RunReport;
use serde::{Deserialize, Serialize};

/// Language identifier written by this engine
pub const LANGUAGE_ID: &str = "Rust";

/// Header line of the benchmark log
pub const LOG_HEADER: &str = "Language,Size,Steps,TimeSeconds";

/// One completed benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Producer language identifier
    pub language: String,
    /// Grid side length
    pub size: usize,
    /// Step count (absent only in legacy three-column rows)
    pub steps: Option<usize>,
    /// Elapsed transition time in seconds
    pub time_seconds: f64,
}

/// Why a log row could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// Row does not have three or four fields
    ColumnCount(usize),
    /// Language field is empty
    MissingLanguage,
    /// A numeric field failed to parse
    InvalidNumber {
        /// Column name
        field: &'static str,
        /// Raw field text
        value: String,
    },
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::ColumnCount(n) => write!(f, "expected 3 or 4 columns, found {n}"),
            RowError::MissingLanguage => write!(f, "empty language field"),
            RowError::InvalidNumber { field, value } => {
                write!(f, "invalid {field} value '{value}'")
            }
        }
    }
}

impl std::error::Error for RowError {}

impl BenchmarkRecord {
    /// Create a complete four-field record
    pub fn new(language: impl Into<String>, size: usize, steps: usize, time_seconds: f64) -> Self {
        Self {
            language: language.into(),
            size,
            steps: Some(steps),
            time_seconds,
        }
    }

    /// Record for a run of this engine on a `size × size` grid
    pub fn from_report(size: usize, report: &RunReport) -> Self {
        Self::new(LANGUAGE_ID, size, report.steps, report.elapsed_seconds())
    }

    /// Format as a log line without the trailing newline
    ///
    /// Always four fields; a missing step count is written as an empty field.
    pub fn to_csv_line(&self) -> String {
        let steps = self.steps.map(|s| s.to_string()).unwrap_or_default();
        format!(
            "{},{},{},{}",
            self.language, self.size, steps, self.time_seconds
        )
    }

    /// Parse one data line
    ///
    /// Four fields are read as language, size, steps, time; three fields as
    /// language, size, time.
    ///
    /// # Errors
    ///
    /// Returns a [`RowError`] describing the first problem found.
    pub fn parse_line(line: &str) -> Result<Self, RowError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (language, size, steps, time) = match fields.as_slice() {
            [language, size, steps, time] => (*language, *size, Some(*steps), *time),
            [language, size, time] => (*language, *size, None, *time),
            other => return Err(RowError::ColumnCount(other.len())),
        };

        if language.is_empty() {
            return Err(RowError::MissingLanguage);
        }
        let size = parse_count("size", size)?;
        let steps = match steps {
            Some("") | None => None,
            Some(raw) => Some(parse_count("steps", raw)?),
        };
        let time_seconds = time
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite() && *t >= 0.0)
            .ok_or_else(|| RowError::InvalidNumber {
                field: "time",
                value: time.to_string(),
            })?;

        Ok(Self {
            language: language.to_string(),
            size,
            steps,
            time_seconds,
        })
    }
}

fn parse_count(field: &'static str, raw: &str) -> Result<usize, RowError> {
    raw.parse().map_err(|_| RowError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}
