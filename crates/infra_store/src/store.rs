//! File-backed scenario store.
//!
//! The store file holds the JSON array produced by
//! [`ScenarioEngine::serialize`]. Saves go through a temporary file in the
//! same directory that atomically replaces the target, so a failed write never
//! corrupts the previous contents.

use crate::error::{Result, StoreError};
use kaizen_core::ValuationParams;
use kaizen_portfolio::ScenarioEngine;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Scenario store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    path: PathBuf,
}

impl ScenarioStore {
    /// Create a store for `path`. Nothing is read until [`ScenarioStore::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the store file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the stored scenarios into a new engine.
    ///
    /// A missing file yields an empty engine.
    pub fn load(&self, params: ValuationParams) -> Result<ScenarioEngine> {
        let mut engine = ScenarioEngine::with_params(params)?;
        if !self.exists() {
            debug!(path = %self.path.display(), "Store file not found, starting empty");
            return Ok(engine);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let count = engine.deserialize(&content)?;
        info!(path = %self.path.display(), count, "Scenarios loaded");
        Ok(engine)
    }

    /// Persist every scenario of `engine`, replacing the file atomically.
    pub fn save(&self, engine: &ScenarioEngine) -> Result<()> {
        let payload = engine.serialize()?;
        write_atomic(&self.path, payload.as_bytes())?;
        info!(path = %self.path.display(), count = engine.len(), "Scenarios saved");
        Ok(())
    }
}

/// Write `bytes` to `path` through a synced temporary file in the same
/// directory, then rename it over the target.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| StoreError::Persist {
        path: path.to_path_buf(),
        message: e.error.to_string(),
    })?;
    debug!(path = %path.display(), size = bytes.len(), "File written atomically");
    Ok(())
}
