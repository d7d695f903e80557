//! What-if analysis.
//!
//! Applies adjustments to a copy of a scenario's inputs and reports the
//! original and adjusted metrics side by side. The base scenario is never
//! modified.

use kaizen_core::model::{compute_metrics, ScenarioMetrics, ValuationParams};
use kaizen_core::{Metric, ScenarioInputs};
use serde::{Deserialize, Serialize};

/// Adjustments applied to a base scenario.
///
/// All zero (the default) reproduces the base scenario.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatIfDeltas {
    /// Relative change in development cost, in percent
    pub development_cost_pct: f64,
    /// Absolute change added to the unit cost change
    pub unit_cost_change_abs: f64,
    /// Percentage points added to the return reduction
    pub return_reduction_pp: f64,
    /// Percentage points added to the sales increase
    pub sales_increase_pp: f64,
    /// Relative change in return processing cost, in percent
    pub return_processing_cost_pct: f64,
    /// Months added to the implementation time (result floored at 0)
    pub implementation_months: f64,
    /// Relative change in average sale price, in percent
    pub price_pct: f64,
}

impl WhatIfDeltas {
    /// Check whether every adjustment is zero.
    pub fn is_zero(&self) -> bool {
        *self == WhatIfDeltas::default()
    }

    /// Apply the adjustments to a copy of `base`.
    pub fn apply(&self, base: &ScenarioInputs) -> ScenarioInputs {
        let mut adjusted = base.clone();
        if self.is_zero() {
            return adjusted;
        }

        adjusted.development_cost = base.development_cost * (1.0 + self.development_cost_pct / 100.0);
        adjusted.unit_cost_change = base.unit_cost_change + self.unit_cost_change_abs;
        adjusted.return_reduction_pct = base.return_reduction_pct + self.return_reduction_pp;
        adjusted.sales_increase_pct = base.sales_increase_pct + self.sales_increase_pp;
        if self.return_processing_cost_pct != 0.0 {
            adjusted.return_processing_cost = Some(
                base.effective_return_processing_cost()
                    * (1.0 + self.return_processing_cost_pct / 100.0),
            );
        }
        adjusted.time_to_implement = (base.time_to_implement + self.implementation_months).max(0.0);
        adjusted.avg_sale_price = base.avg_sale_price * (1.0 + self.price_pct / 100.0);
        adjusted
    }
}

/// Change in one metric between the original and adjusted scenario.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricChange {
    /// Metric name
    pub metric: &'static str,
    /// Value for the base scenario
    pub original: Metric,
    /// Value for the adjusted scenario
    pub adjusted: Metric,
    /// adjusted - original
    pub absolute_change: Metric,
    /// Change relative to |original|, in percent
    pub percent_change: Metric,
}

impl MetricChange {
    /// Build a change record.
    ///
    /// The percent change is not applicable when either side is undefined or
    /// the original is zero.
    pub fn new(metric: &'static str, original: Metric, adjusted: Metric) -> Self {
        let absolute_change = adjusted.zip_with(original, |a, o| a - o);
        let percent_change = match (original.value(), adjusted.value()) {
            (Some(o), Some(a)) if o != 0.0 => Metric::Value((a - o) / o.abs() * 100.0),
            _ => Metric::NotApplicable,
        };
        Self {
            metric,
            original,
            adjusted,
            absolute_change,
            percent_change,
        }
    }
}

/// Outcome of a what-if run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WhatIfResult {
    /// Adjustments that were applied
    pub deltas: WhatIfDeltas,
    /// Inputs after adjustment
    pub adjusted_inputs: ScenarioInputs,
    /// Metrics of the base scenario
    pub original: ScenarioMetrics,
    /// Metrics of the adjusted scenario
    pub adjusted: ScenarioMetrics,
}

impl WhatIfResult {
    /// Per-metric comparison of original and adjusted results.
    pub fn comparison(&self) -> Vec<MetricChange> {
        let (o, a) = (&self.original, &self.adjusted);
        vec![
            MetricChange::new(
                "monthly_return_savings",
                Metric::Value(o.monthly_return_savings),
                Metric::Value(a.monthly_return_savings),
            ),
            MetricChange::new(
                "monthly_sales_benefit",
                Metric::Value(o.monthly_sales_benefit),
                Metric::Value(a.monthly_sales_benefit),
            ),
            MetricChange::new(
                "additional_costs_monthly",
                Metric::Value(o.additional_costs_monthly),
                Metric::Value(a.additional_costs_monthly),
            ),
            MetricChange::new(
                "monthly_net_benefit",
                Metric::Value(o.monthly_net_benefit),
                Metric::Value(a.monthly_net_benefit),
            ),
            MetricChange::new(
                "annual_net_benefit",
                Metric::Value(o.annual_net_benefit),
                Metric::Value(a.annual_net_benefit),
            ),
            MetricChange::new("roi_pct", o.roi_pct, a.roi_pct),
            MetricChange::new(
                "payback_period_years",
                o.payback_period_years,
                a.payback_period_years,
            ),
            MetricChange::new("npv", Metric::Value(o.npv), Metric::Value(a.npv)),
            MetricChange::new(
                "breakeven_month",
                o.breakeven_month.into(),
                a.breakeven_month.into(),
            ),
            MetricChange::new("score", o.score, a.score),
        ]
    }

    /// Look up the change for one metric by name.
    pub fn change(&self, metric: &str) -> Option<MetricChange> {
        self.comparison().into_iter().find(|c| c.metric == metric)
    }
}

/// Run a what-if analysis on `base`.
pub fn what_if(base: &ScenarioInputs, deltas: &WhatIfDeltas, params: &ValuationParams) -> WhatIfResult {
    let adjusted_inputs = deltas.apply(base);
    WhatIfResult {
        deltas: *deltas,
        original: compute_metrics(base, params),
        adjusted: compute_metrics(&adjusted_inputs, params),
        adjusted_inputs,
    }
}
