//! Scenario engine.
//!
//! Owns the ordered scenario collection. Names are the primary key. Every
//! mutation is atomic: it is either fully applied or rejected with the
//! collection unchanged.

use crate::aggregate::{PortfolioAggregate, ScenarioFilter};
use crate::codec;
use crate::error::{EngineError, Result};
use crate::presets::example_scenarios;
use crate::whatif::{self, WhatIfDeltas, WhatIfResult};
use kaizen_core::{compute_metrics, ScenarioInputs, ScenarioMetrics, ValuationParams};
use serde::Serialize;
use tracing::{debug, info};

/// A stored scenario together with its freshly computed metrics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluatedScenario<'a> {
    /// Stored inputs
    pub inputs: &'a ScenarioInputs,
    /// Metrics derived from the inputs
    pub metrics: ScenarioMetrics,
}

impl EvaluatedScenario<'_> {
    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.inputs.scenario_name
    }
}

/// In-memory scenario collection with derived-metric views.
///
/// Metrics are never stored; they are recomputed from the inputs on every
/// read using the engine's [`ValuationParams`].
#[derive(Clone, Debug, Default)]
pub struct ScenarioEngine {
    scenarios: Vec<ScenarioInputs>,
    params: ValuationParams,
}

impl ScenarioEngine {
    /// Create an empty engine with default valuation parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with the given valuation parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParams`] when the parameters fail
    /// [`ValuationParams::validate`].
    pub fn with_params(params: ValuationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            scenarios: Vec::new(),
            params,
        })
    }

    /// Valuation parameters used for NPV.
    pub fn params(&self) -> &ValuationParams {
        &self.params
    }

    /// Replace the valuation parameters. Invalid parameters leave the
    /// current ones in place.
    pub fn set_params(&mut self, params: ValuationParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Number of stored scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Check if no scenario is stored.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Scenario names in collection order.
    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.scenario_name.as_str()).collect()
    }

    /// Stored inputs in collection order.
    pub fn scenarios(&self) -> &[ScenarioInputs] {
        &self.scenarios
    }

    /// Look up a scenario by name.
    pub fn get(&self, name: &str) -> Option<&ScenarioInputs> {
        self.scenarios.iter().find(|s| s.scenario_name == name)
    }

    /// Check whether a scenario with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.scenarios.iter().position(|s| s.scenario_name == name)
    }

    fn require(&self, name: &str) -> Result<&ScenarioInputs> {
        self.get(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    /// Compute metrics for one stored scenario.
    pub fn metrics(&self, name: &str) -> Result<ScenarioMetrics> {
        self.require(name).map(|s| self.evaluate(s))
    }

    /// Compute metrics for arbitrary inputs with this engine's parameters.
    pub fn evaluate(&self, inputs: &ScenarioInputs) -> ScenarioMetrics {
        compute_metrics(inputs, &self.params)
    }

    /// Every stored scenario with its metrics, in collection order.
    pub fn evaluated(&self) -> Vec<EvaluatedScenario<'_>> {
        self.scenarios
            .iter()
            .map(|inputs| EvaluatedScenario {
                inputs,
                metrics: self.evaluate(inputs),
            })
            .collect()
    }

    // ================================================================
    // Mutations
    // ================================================================

    /// Validate and append a scenario.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] for invalid inputs and
    /// [`EngineError::DuplicateName`] if the name is taken.
    pub fn add(&mut self, inputs: ScenarioInputs) -> Result<()> {
        inputs.validate()?;
        if self.contains(&inputs.scenario_name) {
            return Err(EngineError::DuplicateName(inputs.scenario_name));
        }
        info!(scenario = %inputs.scenario_name, count = self.len() + 1, "Scenario added");
        self.scenarios.push(inputs);
        Ok(())
    }

    /// Replace the inputs of scenario `name`, keeping its position.
    ///
    /// The replacement may carry a new name as long as it is not taken by a
    /// different scenario.
    pub fn update(&mut self, name: &str, inputs: ScenarioInputs) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))?;
        inputs.validate()?;
        if inputs.scenario_name != name && self.contains(&inputs.scenario_name) {
            return Err(EngineError::DuplicateName(inputs.scenario_name));
        }
        info!(scenario = %name, new_name = %inputs.scenario_name, "Scenario updated");
        self.scenarios[index] = inputs;
        Ok(())
    }

    /// Remove and return scenario `name`.
    pub fn delete(&mut self, name: &str) -> Result<ScenarioInputs> {
        let index = self
            .position(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))?;
        info!(scenario = %name, "Scenario deleted");
        Ok(self.scenarios.remove(index))
    }

    /// Remove every scenario, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.scenarios.len();
        self.scenarios.clear();
        info!(removed, "Scenarios cleared");
        removed
    }

    /// Copy scenario `name` under `new_name` (default `"<name> (Clone)"`).
    ///
    /// Returns the name of the copy.
    pub fn clone_scenario(&mut self, name: &str, new_name: Option<&str>) -> Result<String> {
        let mut copy = self.require(name)?.clone();
        copy.scenario_name = match new_name {
            Some(n) => n.to_string(),
            None => format!("{} (Clone)", name),
        };
        let copy_name = copy.scenario_name.clone();
        self.add(copy)?;
        Ok(copy_name)
    }

    /// Add the bundled examples whose names are not taken yet.
    ///
    /// Returns the number of scenarios added.
    pub fn add_examples(&mut self) -> usize {
        let mut added = 0;
        for example in example_scenarios() {
            if self.contains(&example.scenario_name) {
                debug!(scenario = %example.scenario_name, "Example already present, skipping");
                continue;
            }
            self.scenarios.push(example);
            added += 1;
        }
        info!(added, "Example scenarios loaded");
        added
    }

    // ================================================================
    // Analysis
    // ================================================================

    /// Evaluate several named scenarios side by side.
    ///
    /// Repeated names are compared once.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] for an unknown name and
    /// [`EngineError::InsufficientScenarios`] when fewer than two distinct
    /// scenarios are named.
    pub fn compare(&self, names: &[&str]) -> Result<Vec<EvaluatedScenario<'_>>> {
        let mut rows: Vec<EvaluatedScenario<'_>> = Vec::with_capacity(names.len());
        for name in names {
            if rows.iter().any(|r| r.name() == *name) {
                continue;
            }
            let inputs = self.require(name)?;
            rows.push(EvaluatedScenario {
                inputs,
                metrics: self.evaluate(inputs),
            });
        }
        if rows.len() < 2 {
            return Err(EngineError::InsufficientScenarios(rows.len()));
        }
        Ok(rows)
    }

    /// Run a what-if analysis on scenario `name`. The scenario is not modified.
    pub fn what_if(&self, name: &str, deltas: &WhatIfDeltas) -> Result<WhatIfResult> {
        let base = self.require(name)?;
        Ok(whatif::what_if(base, deltas, &self.params))
    }

    /// Run a what-if analysis and store the adjusted inputs as `new_name`.
    pub fn save_what_if(
        &mut self,
        name: &str,
        deltas: &WhatIfDeltas,
        new_name: &str,
    ) -> Result<WhatIfResult> {
        let mut result = self.what_if(name, deltas)?;
        result.adjusted_inputs.scenario_name = new_name.to_string();
        self.add(result.adjusted_inputs.clone())?;
        Ok(result)
    }

    /// Aggregate the scenarios that pass `filter`.
    pub fn aggregate(&self, filter: &ScenarioFilter) -> PortfolioAggregate {
        self.aggregate_where(|row| filter.matches(row))
    }

    /// Aggregate the scenarios accepted by an arbitrary predicate.
    pub fn aggregate_where<F>(&self, predicate: F) -> PortfolioAggregate
    where
        F: Fn(&EvaluatedScenario<'_>) -> bool,
    {
        let rows: Vec<_> = self.evaluated().into_iter().filter(|r| predicate(r)).collect();
        PortfolioAggregate::from_rows(&rows)
    }

    // ================================================================
    // Serialisation
    // ================================================================

    /// Encode the collection as a JSON array of input records.
    pub fn serialize(&self) -> Result<String> {
        codec::encode(&self.scenarios)
    }

    /// Replace the collection with the records in `payload`.
    ///
    /// On error the current collection is left untouched. Returns the number
    /// of scenarios loaded.
    pub fn deserialize(&mut self, payload: &str) -> Result<usize> {
        let records = codec::decode(payload)?;
        info!(count = records.len(), "Scenario collection replaced");
        self.scenarios = records;
        Ok(self.scenarios.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kaizen_core::Metric;

    fn reference(name: &str) -> ScenarioInputs {
        ScenarioInputs::builder(name, "Widget")
            .current_unit_sales(1000.0)
            .current_returns(80.0)
            .avg_sale_price(50.0)
            .current_unit_cost(20.0)
            .return_processing_cost(8.0)
            .development_cost(10_000.0)
            .unit_cost_change(1.0)
            .return_reduction_pct(30.0)
            .sales_increase_pct(5.0)
            .build()
            .unwrap()
    }

    fn engine_with(names: &[&str]) -> ScenarioEngine {
        let mut engine = ScenarioEngine::new();
        for name in names {
            engine.add(reference(name)).unwrap();
        }
        engine
    }

    // ================================================================
    // add / get
    // ================================================================

    #[test]
    fn test_add_and_get() {
        let engine = engine_with(&["A", "B"]);
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.names(), vec!["A", "B"]);
        assert!(engine.get("A").is_some());
        assert!(engine.get("C").is_none());
    }

    #[test]
    fn test_add_duplicate_leaves_collection_unchanged() {
        let mut engine = engine_with(&["A"]);
        let err = engine.add(reference("A")).unwrap_err();
        assert_eq!(err, EngineError::DuplicateName("A".into()));
        assert!(err.is_validation());
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_add_invalid_rejected() {
        let mut engine = ScenarioEngine::new();
        let mut bad = reference("Bad");
        bad.current_unit_cost = -1.0;
        assert!(matches!(engine.add(bad), Err(EngineError::Validation(_))));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_metrics_for_reference_scenario() {
        let engine = engine_with(&["A"]);
        let metrics = engine.metrics("A").unwrap();
        assert_relative_eq!(metrics.monthly_net_benefit, 1368.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.roi_pct.value().unwrap(), 164.16, epsilon = 1e-9);
        assert!(matches!(engine.metrics("Z"), Err(EngineError::NotFound(_))));
    }

    // ================================================================
    // update / delete / clear / clone
    // ================================================================

    #[test]
    fn test_update_in_place() {
        let mut engine = engine_with(&["A", "B"]);
        let mut changed = reference("A");
        changed.development_cost = 20_000.0;
        engine.update("A", changed).unwrap();
        assert_eq!(engine.names(), vec!["A", "B"]);
        assert_eq!(engine.get("A").unwrap().development_cost, 20_000.0);
    }

    #[test]
    fn test_update_rename() {
        let mut engine = engine_with(&["A", "B"]);
        engine.update("A", reference("C")).unwrap();
        assert_eq!(engine.names(), vec!["C", "B"]);
    }

    #[test]
    fn test_update_rename_to_taken_name_fails() {
        let mut engine = engine_with(&["A", "B"]);
        let err = engine.update("A", reference("B")).unwrap_err();
        assert_eq!(err, EngineError::DuplicateName("B".into()));
        assert_eq!(engine.names(), vec!["A", "B"]);
    }

    #[test]
    fn test_update_invalid_keeps_old_inputs() {
        let mut engine = engine_with(&["A"]);
        let mut bad = reference("A");
        bad.current_returns = 5000.0;
        assert!(engine.update("A", bad).is_err());
        assert_eq!(engine.get("A").unwrap(), &reference("A"));
    }

    #[test]
    fn test_update_missing() {
        let mut engine = ScenarioEngine::new();
        assert!(matches!(
            engine.update("A", reference("A")),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_and_clear() {
        let mut engine = engine_with(&["A", "B", "C"]);
        let removed = engine.delete("B").unwrap();
        assert_eq!(removed.scenario_name, "B");
        assert_eq!(engine.names(), vec!["A", "C"]);
        assert!(engine.delete("B").is_err());
        assert_eq!(engine.clear(), 2);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_clone_scenario_default_name() {
        let mut engine = engine_with(&["A"]);
        let name = engine.clone_scenario("A", None).unwrap();
        assert_eq!(name, "A (Clone)");
        assert_eq!(engine.len(), 2);
        // Cloning again collides with the first copy
        assert!(matches!(
            engine.clone_scenario("A", None),
            Err(EngineError::DuplicateName(_))
        ));
        assert_eq!(engine.clone_scenario("A", Some("A2")).unwrap(), "A2");
    }

    #[test]
    fn test_add_examples_skips_existing() {
        let mut engine = ScenarioEngine::new();
        assert_eq!(engine.add_examples(), 3);
        assert_eq!(engine.add_examples(), 0);
        assert_eq!(engine.len(), 3);
    }

    // ================================================================
    // compare / what-if / aggregate
    // ================================================================

    #[test]
    fn test_compare() {
        let engine = engine_with(&["A", "B", "C"]);
        let rows = engine.compare(&["C", "A"]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name(), "C");
        assert_eq!(
            engine.compare(&["A", "A"]).unwrap_err(),
            EngineError::InsufficientScenarios(1)
        );
        assert!(matches!(
            engine.compare(&["A", "Z"]),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_what_if_does_not_mutate() {
        let engine = engine_with(&["A"]);
        let deltas = WhatIfDeltas {
            development_cost_pct: 100.0,
            ..WhatIfDeltas::default()
        };
        let result = engine.what_if("A", &deltas).unwrap();
        assert_relative_eq!(result.adjusted_inputs.development_cost, 20_000.0);
        assert_eq!(engine.get("A").unwrap().development_cost, 10_000.0);
    }

    #[test]
    fn test_save_what_if() {
        let mut engine = engine_with(&["A"]);
        let deltas = WhatIfDeltas {
            price_pct: 10.0,
            ..WhatIfDeltas::default()
        };
        engine.save_what_if("A", &deltas, "A priced up").unwrap();
        assert_eq!(engine.len(), 2);
        assert_relative_eq!(engine.get("A priced up").unwrap().avg_sale_price, 55.0, epsilon = 1e-12);
        assert!(engine.save_what_if("A", &deltas, "A").is_err());
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_aggregate_filtered() {
        let mut engine = engine_with(&["A"]);
        let mut footwear = reference("B");
        footwear.product_category = "Footwear".into();
        engine.add(footwear).unwrap();

        let all = engine.aggregate(&ScenarioFilter::new());
        assert_eq!(all.overall.count, 2);

        let filtered = engine.aggregate(&ScenarioFilter::new().with_category("Footwear"));
        assert_eq!(filtered.overall.count, 1);
        assert_eq!(filtered.best_npv.as_deref(), Some("B"));

        let none = engine.aggregate_where(|r| r.metrics.roi_pct == Metric::NotApplicable);
        assert!(none.is_empty());
    }

    // ================================================================
    // serialize / deserialize
    // ================================================================

    #[test]
    fn test_serialize_round_trip() {
        let mut engine = ScenarioEngine::new();
        engine.add_examples();
        let payload = engine.serialize().unwrap();

        let mut restored = ScenarioEngine::new();
        assert_eq!(restored.deserialize(&payload).unwrap(), 3);
        assert_eq!(restored.scenarios(), engine.scenarios());
    }

    #[test]
    fn test_deserialize_error_leaves_state_untouched() {
        let mut engine = engine_with(&["A"]);
        assert!(matches!(
            engine.deserialize("[{\"scenario_name\": 5}]"),
            Err(EngineError::ImportFormat(_))
        ));
        assert_eq!(engine.names(), vec!["A"]);
    }

    // ================================================================
    // valuation parameters
    // ================================================================

    #[test]
    fn test_with_params_rejects_invalid_rate() {
        let params = ValuationParams::default().with_discount_rate(-1.0);
        assert!(matches!(
            ScenarioEngine::with_params(params),
            Err(EngineError::InvalidParams(_))
        ));
        assert!(ScenarioEngine::with_params(ValuationParams::default().with_discount_rate(0.05)).is_ok());
    }

    #[test]
    fn test_set_params_keeps_previous_on_error() {
        let mut engine = engine_with(&["A"]);
        let npv_before = engine.metrics("A").unwrap().npv;

        let err = engine
            .set_params(ValuationParams::default().with_discount_rate(f64::NAN))
            .unwrap_err();
        assert!(err.to_string().contains("discount_rate"));
        assert_eq!(engine.params(), &ValuationParams::default());
        assert_eq!(engine.metrics("A").unwrap().npv, npv_before);
        assert!(engine.metrics("A").unwrap().npv.is_finite());

        engine
            .set_params(ValuationParams::default().with_horizon_months(12))
            .unwrap();
        assert_eq!(engine.params().horizon_months, 12);
        assert!(engine.metrics("A").unwrap().npv < npv_before);
    }
}
