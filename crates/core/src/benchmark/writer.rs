//! Append-only benchmark log writer
//!
//! Each run appends exactly one line. The line (plus the header, when the
//! file is still empty) is formatted up front and handed to a single
//! `write_all` on a file opened in append mode, so concurrent producers in
//! separate processes never interleave within a line. The file is synced
//! before returning.

use super::record::{BenchmarkRecord, LOG_HEADER};
use crate::error::{FireSimError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sink for completed benchmark runs
pub trait BenchmarkRecorder {
    /// Persist one record
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be stored; callers must not
    /// report success in that case.
    fn append(&mut self, record: &BenchmarkRecord) -> Result<()>;
}

/// Recorder appending CSV lines to a shared log file
#[derive(Debug, Clone)]
pub struct CsvLogRecorder {
    path: PathBuf,
}

impl CsvLogRecorder {
    /// Recorder for the log at `path` (created on first append)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BenchmarkRecorder for CsvLogRecorder {
    fn append(&mut self, record: &BenchmarkRecord) -> Result<()> {
        append_record(&self.path, record)
    }
}

/// Create a fresh log containing only the header line
///
/// # Errors
///
/// Returns [`FireSimError::Io`] if the file already exists or cannot be
/// written.
pub fn create_log<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| FireSimError::io(path, e))?;
    file.write_all(format!("{LOG_HEADER}\n").as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| FireSimError::io(path, e))
}

/// Append one record to the log at `path`
///
/// The file is created if missing, and the header is written first when the
/// file is empty. Two producers racing on a brand-new file may both add a
/// header; readers skip header lines wherever they appear.
///
/// # Errors
///
/// Returns [`FireSimError::Io`] if the file cannot be opened, written, or
/// synced.
pub fn append_record<P: AsRef<Path>>(path: P, record: &BenchmarkRecord) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FireSimError::io(path, e))?;
    let is_empty = file
        .metadata()
        .map_err(|e| FireSimError::io(path, e))?
        .len()
        == 0;

    let mut buf = String::new();
    if is_empty {
        buf.push_str(LOG_HEADER);
        buf.push('\n');
    }
    buf.push_str(&record.to_csv_line());
    buf.push('\n');

    file.write_all(buf.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| FireSimError::io(path, e))?;

    debug!(
        "Appended benchmark record to {}: {}",
        path.display(),
        buf.trim_end()
    );
    Ok(())
}
