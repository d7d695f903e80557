//! JSON encoding of the scenario collection.
//!
//! The payload is a JSON array with one record per scenario holding only
//! input fields. Unknown fields are ignored and missing optional fields
//! decode as absent, so exports from older versions still load.

use crate::error::{EngineError, Result};
use kaizen_core::ScenarioInputs;
use std::collections::HashSet;

/// Encode scenarios as a pretty-printed JSON array.
pub fn encode(scenarios: &[ScenarioInputs]) -> Result<String> {
    serde_json::to_string_pretty(scenarios).map_err(|e| EngineError::Serialisation(e.to_string()))
}

/// Decode and validate a JSON array of scenario records.
///
/// Fails with [`EngineError::ImportFormat`] on malformed JSON, an invalid
/// record, or a repeated scenario name.
pub fn decode(payload: &str) -> Result<Vec<ScenarioInputs>> {
    let records: Vec<ScenarioInputs> =
        serde_json::from_str(payload).map_err(|e| EngineError::ImportFormat(e.to_string()))?;

    check_records(&records)?;
    Ok(records)
}

fn check_records(records: &[ScenarioInputs]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        record.validate().map_err(|e| {
            EngineError::ImportFormat(format!(
                "record {} ({}): {}",
                index, record.scenario_name, e
            ))
        })?;
        if !seen.insert(record.scenario_name.as_str()) {
            return Err(EngineError::ImportFormat(format!(
                "record {}: duplicate scenario name {}",
                index, record.scenario_name
            )));
        }
    }
    Ok(())
}
