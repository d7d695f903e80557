//! Store error types.

use kaizen_portfolio::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading, saving or exporting scenarios.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a file failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The engine rejected the stored payload or could not encode it.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The temporary file could not replace the target.
    #[error("Failed to replace {}: {message}", path.display())]
    Persist {
        /// Target file
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Unknown export format name.
    #[error("Unsupported export format: {0}. Supported: csv, json")]
    UnsupportedFormat(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_is_transparent() {
        let err: StoreError = EngineError::ImportFormat("expected `[`".into()).into();
        assert_eq!(err.to_string(), "Import format error: expected `[`");
    }

    #[test]
    fn test_io_error_names_path() {
        let err = StoreError::io(
            "/data/kaizen.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "IO error on /data/kaizen.json: denied");
    }
}
