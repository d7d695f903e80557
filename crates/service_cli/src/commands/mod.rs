//! CLI command implementations
//!
//! Each submodule implements a group of CLI commands. Mutating commands load
//! the store, apply one engine operation and save.

pub mod analysis;
pub mod data;
pub mod scenario;

use infra_config::KaizenConfig;
use infra_store::ScenarioStore;
use kaizen_core::ScenarioInputs;
use kaizen_portfolio::ScenarioEngine;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::{CliError, Result};

/// Resolved configuration plus the store it points at.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: KaizenConfig,
    /// Scenario store
    pub store: ScenarioStore,
}

impl Context {
    /// Build a context from a resolved configuration.
    pub fn new(config: KaizenConfig) -> Self {
        let store = ScenarioStore::new(config.data_file.clone());
        Self { config, store }
    }

    /// Load the engine, seeding the bundled examples into an empty store
    /// when configured to.
    pub fn load_engine(&self) -> Result<ScenarioEngine> {
        let mut engine = self.store.load(self.config.valuation)?;
        if engine.is_empty() && !self.store.exists() && self.config.seed_examples {
            let added = engine.add_examples();
            info!(added, "Seeded example scenarios");
        }
        Ok(engine)
    }

    /// Persist the engine.
    pub fn save(&self, engine: &ScenarioEngine) -> Result<()> {
        self.store.save(engine)?;
        Ok(())
    }
}

/// Read a JSON text from `source` (a path, or `-` for stdin).
pub fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    if !Path::new(source).exists() {
        return Err(CliError::FileNotFound(source.to_string()));
    }
    Ok(std::fs::read_to_string(source)?)
}

/// Parse one scenario input record.
pub fn parse_inputs(content: &str) -> Result<ScenarioInputs> {
    Ok(serde_json::from_str(content)?)
}
