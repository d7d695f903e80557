//! CLI error types.

use infra_config::ConfigError;
use infra_store::StoreError;
use kaizen_portfolio::EngineError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scenario store could not be read or written.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The engine rejected the operation.
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// An input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON input could not be parsed or output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
