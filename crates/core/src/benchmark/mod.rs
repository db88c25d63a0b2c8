//! Benchmark result log
//!
//! - [`record`]: the four-column record format
//! - [`writer`]: append-only producer side
//! - [`reader`]: tolerant consumer side with per-size aggregation

pub mod reader;
pub mod record;
pub mod writer;

// Re-export main types
pub use reader::{aggregate, parse_log, read_log, AggregateRow, LogReadout, SkippedRow};
pub use record::{BenchmarkRecord, RowError, LANGUAGE_ID, LOG_HEADER};
pub use writer::{append_record, create_log, BenchmarkRecorder, CsvLogRecorder};
