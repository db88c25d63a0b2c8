//! Error types for the forest fire engine

use std::path::PathBuf;

/// Errors produced while configuring, running, or recording a simulation
#[derive(Debug)]
pub enum FireSimError {
    /// A simulation parameter is outside its valid range
    InvalidConfig(String),
    /// A raw byte does not decode to a cell state
    InvalidCellState(u8),
    /// Cell buffer length does not match `size * size`
    GridShape {
        /// Expected number of cells
        expected: usize,
        /// Number of cells supplied
        actual: usize,
    },
    /// Filesystem operation failed
    Io {
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// Configuration file could not be parsed
    ConfigParse(String),
    /// Snapshot image could not be encoded or saved
    Snapshot {
        /// Image path
        path: PathBuf,
        /// Underlying error
        source: image::ImageError,
    },
}

impl FireSimError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FireSimError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for FireSimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FireSimError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            FireSimError::InvalidCellState(value) => {
                write!(f, "Invalid cell state {value} (expected 0, 1 or 2)")
            }
            FireSimError::GridShape { expected, actual } => {
                write!(f, "Grid expects {expected} cells, got {actual}")
            }
            FireSimError::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            FireSimError::ConfigParse(msg) => write!(f, "Failed to parse config: {msg}"),
            FireSimError::Snapshot { path, source } => {
                write!(f, "Failed to save snapshot {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FireSimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FireSimError::Io { source, .. } => Some(source),
            FireSimError::Snapshot { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FireSimError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let err = FireSimError::InvalidConfig("size must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: size must be at least 1"
        );

        let err = FireSimError::InvalidCellState(7);
        assert!(err.to_string().contains('7'));

        let err = FireSimError::GridShape {
            expected: 9,
            actual: 8,
        };
        assert_eq!(err.to_string(), "Grid expects 9 cells, got 8");
    }

    #[test]
    fn test_io_error_exposes_source() {
        let err = FireSimError::io(
            "/nonexistent/log.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/nonexistent/log.csv"));
        assert!(err.source().is_some());
    }
}
