//! Validation error types.
//!
//! Raised before a scenario enters the collection; a failed validation
//! never mutates engine state.

use thiserror::Error;

/// Errors found while validating scenario inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field is empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field that must be non-negative is negative.
    #[error("Field {field} must be non-negative, got {value}")]
    NegativeValue {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A numeric field is NaN or infinite.
    #[error("Field {0} must be a finite number")]
    NonFinite(&'static str),

    /// More monthly returns than monthly sales.
    #[error("Returns cannot exceed sales: returns={returns}, sales={sales}")]
    ReturnsExceedSales {
        /// Monthly returns
        returns: f64,
        /// Monthly unit sales
        sales: f64,
    },
}
