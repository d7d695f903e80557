//! Configuration errors.

use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// The config file is not valid TOML for [`crate::KaizenConfig`].
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more settings are out of range.
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_messages() {
        let err = ConfigError::Validation(vec![
            "discount_rate must be finite".to_string(),
            "horizon_months must be greater than 0".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation errors: discount_rate must be finite; horizon_months must be greater than 0"
        );
    }
}
