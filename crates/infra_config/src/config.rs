//! KaizenROI configuration.
//!
//! Loaded from a TOML file with environment variable overrides:
//!
//! ```toml
//! data_file = "kaizen_scenarios.json"
//! log_level = "info"
//! seed_examples = false
//!
//! [valuation]
//! discount_rate = 0.10
//! horizon_months = 36
//! adoption_curve = "immediate"
//! ramp_months = 12
//! ```

use crate::error::ConfigError;
use kaizen_core::{AdoptionCurve, ValuationParams};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "kaizen.toml";

/// Default scenario store file name.
pub const DEFAULT_DATA_FILE: &str = "kaizen_scenarios.json";

/// Accepted log levels.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KaizenConfig {
    /// Scenario store path
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// NPV projection parameters
    #[serde(default)]
    pub valuation: ValuationParams,

    /// Load the bundled examples when the store is empty
    #[serde(default)]
    pub seed_examples: bool,

    /// Environment values that could not be parsed
    #[serde(skip)]
    override_errors: Vec<String>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for KaizenConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level(),
            valuation: ValuationParams::default(),
            seed_examples: false,
            override_errors: Vec::new(),
        }
    }
}

impl KaizenConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if it exists, otherwise return the defaults.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Recognised keys: `KAIZEN_DATA_FILE`, `KAIZEN_LOG_LEVEL`,
    /// `KAIZEN_DISCOUNT_RATE`, `KAIZEN_HORIZON_MONTHS`, `KAIZEN_ADOPTION_CURVE`.
    /// Unparseable values are reported by [`KaizenConfig::validate`].
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_file) = lookup("KAIZEN_DATA_FILE") {
            self.data_file = PathBuf::from(data_file);
        }

        if let Some(log_level) = lookup("KAIZEN_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(rate) = lookup("KAIZEN_DISCOUNT_RATE") {
            match rate.trim().parse() {
                Ok(r) => self.valuation.discount_rate = r,
                Err(_) => self
                    .override_errors
                    .push(format!("KAIZEN_DISCOUNT_RATE '{}' is not a number", rate)),
            }
        }

        if let Some(months) = lookup("KAIZEN_HORIZON_MONTHS") {
            match months.trim().parse() {
                Ok(m) => self.valuation.horizon_months = m,
                Err(_) => self.override_errors.push(format!(
                    "KAIZEN_HORIZON_MONTHS '{}' is not a whole number of months",
                    months
                )),
            }
        }

        if let Some(curve) = lookup("KAIZEN_ADOPTION_CURVE") {
            match curve.parse::<AdoptionCurve>() {
                Ok(c) => self.valuation.adoption_curve = c,
                Err(e) => self.override_errors.push(e),
            }
        }

        self
    }

    /// Validate the configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.override_errors.clone();

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, LOG_LEVELS
            ));
        }

        if self.data_file.as_os_str().is_empty() {
            errors.push("data_file cannot be empty".to_string());
        }

        errors.extend(self.valuation.problems().iter().map(|p| p.to_string()));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load (or default), apply environment overrides, and validate.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = KaizenConfig::default();
        assert_eq!(config.data_file, PathBuf::from("kaizen_scenarios.json"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.valuation.discount_rate, 0.10);
        assert_eq!(config.valuation.horizon_months, 36);
        assert!(!config.seed_examples);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = KaizenConfig::from_toml(
            r#"
            seed_examples = true

            [valuation]
            discount_rate = 0.08
            adoption_curve = "s_curve"
            "#,
        )
        .unwrap();
        assert!(config.seed_examples);
        assert_eq!(config.valuation.discount_rate, 0.08);
        assert_eq!(config.valuation.adoption_curve, AdoptionCurve::SCurve);
        assert_eq!(config.valuation.horizon_months, 36);
        assert_eq!(config.data_file, PathBuf::from("kaizen_scenarios.json"));
    }

    #[test]
    fn test_parse_error() {
        let err = KaizenConfig::from_toml("log_level = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_file = \"portfolio.json\"\nlog_level = \"debug\"").unwrap();
        let config = KaizenConfig::load(file.path()).unwrap();
        assert_eq!(config.data_file, PathBuf::from("portfolio.json"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = KaizenConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, KaizenConfig::default());
        assert!(matches!(
            KaizenConfig::load(&dir.path().join("absent.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = KaizenConfig::default().with_overrides_from(env(&[
            ("KAIZEN_DATA_FILE", "/tmp/other.json"),
            ("KAIZEN_LOG_LEVEL", "warn"),
            ("KAIZEN_DISCOUNT_RATE", "0.05"),
            ("KAIZEN_HORIZON_MONTHS", "60"),
            ("KAIZEN_ADOPTION_CURVE", "fast-initial"),
        ]));
        assert_eq!(config.data_file, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.valuation.discount_rate, 0.05);
        assert_eq!(config.valuation.horizon_months, 60);
        assert_eq!(config.valuation.adoption_curve, AdoptionCurve::FastInitial);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_env_values_reported_by_validate() {
        let config = KaizenConfig::default().with_overrides_from(env(&[
            ("KAIZEN_DISCOUNT_RATE", "ten percent"),
            ("KAIZEN_ADOPTION_CURVE", "zigzag"),
        ]));
        // Unparseable values leave the previous setting in place
        assert_eq!(config.valuation.discount_rate, 0.10);

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.contains("KAIZEN_DISCOUNT_RATE")));
                assert!(errors.iter().any(|e| e.contains("zigzag")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let mut config = KaizenConfig::default();
        config.log_level = "loud".to_string();
        config.valuation.discount_rate = f64::NAN;
        config.valuation.horizon_months = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("discount_rate")));
                assert!(errors.iter().any(|e| e.contains("horizon_months")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_log_levels_case_insensitive() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO", "Debug"] {
            let mut config = KaizenConfig::default();
            config.log_level = level.to_string();
            assert!(config.validate().is_ok(), "{} should be valid", level);
        }
    }
}
