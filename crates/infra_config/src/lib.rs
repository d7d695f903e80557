//! # Infra Config (I: Infrastructure)
//!
//! Configuration for the KaizenROI tools: scenario store location, log level,
//! NPV projection parameters and example seeding.
//!
//! Settings come from `kaizen.toml` when present, then environment variables
//! (`KAIZEN_*`) override individual values. Validation reports every problem
//! at once.
//!
//! ## Example
//!
//! ```
//! use infra_config::KaizenConfig;
//!
//! let config = KaizenConfig::from_toml("[valuation]\nhorizon_months = 24").unwrap();
//! assert_eq!(config.valuation.horizon_months, 24);
//! assert!(config.validate().is_ok());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{KaizenConfig, DEFAULT_CONFIG_FILE, DEFAULT_DATA_FILE, LOG_LEVELS};
pub use error::ConfigError;
