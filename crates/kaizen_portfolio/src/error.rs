//! Engine error types.
//!
//! Every failing operation leaves the scenario collection exactly as it was.

use kaizen_core::{ValidationError, ValuationError};
use thiserror::Error;

/// Errors that can occur during scenario engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Scenario inputs failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A scenario with this name already exists.
    #[error("Duplicate scenario name: {0}")]
    DuplicateName(String),

    /// No scenario with this name.
    #[error("Scenario not found: {0}")]
    NotFound(String),

    /// A persisted payload could not be decoded.
    #[error("Import format error: {0}")]
    ImportFormat(String),

    /// A comparison was requested with fewer than two known scenarios.
    #[error("Comparison requires at least 2 scenarios, found {0}")]
    InsufficientScenarios(usize),

    /// Valuation parameters were rejected.
    #[error("Invalid valuation parameters: {0}")]
    InvalidParams(#[from] ValuationError),

    /// The collection could not be encoded.
    #[error("Serialisation error: {0}")]
    Serialisation(String),
}

impl EngineError {
    /// Check whether this is an input validation failure (including duplicate names).
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_) | EngineError::DuplicateName(_))
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
