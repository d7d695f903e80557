//! Scenario input records.

mod inputs;

pub use inputs::{ScenarioInputs, ScenarioInputsBuilder, DEFAULT_PROCESSING_COST_RATIO};
