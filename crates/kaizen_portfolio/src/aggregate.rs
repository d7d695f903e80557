//! Portfolio aggregation over evaluated scenarios.
//!
//! Sums, means that skip not-applicable values, and per-category /
//! per-lifecycle groupings with the same statistics.

use crate::engine::EvaluatedScenario;
use kaizen_core::{LifecycleStage, Metric};
use serde::Serialize;
use std::collections::BTreeMap;

/// Largest bubble size for the scenario with the highest annual net benefit.
pub const BUBBLE_SIZE_MAX: f64 = 50.0;

/// Smallest bubble size when at least one scenario has a positive benefit.
pub const BUBBLE_SIZE_MIN: f64 = 10.0;

/// Size used for every bubble when no scenario has a positive benefit.
pub const BUBBLE_SIZE_DEFAULT: f64 = 15.0;

/// Predicate over evaluated scenarios.
///
/// Empty sets match everything. A threshold excludes scenarios whose
/// thresholded metric is not applicable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioFilter {
    /// Accepted product categories (case-insensitive)
    pub categories: Vec<String>,
    /// Accepted sales channels (case-insensitive)
    pub channels: Vec<String>,
    /// Accepted lifecycle stages
    pub lifecycle_stages: Vec<LifecycleStage>,
    /// Minimum ROI in percent
    pub min_roi: Option<f64>,
    /// Minimum ROI score
    pub min_score: Option<f64>,
}

impl ScenarioFilter {
    /// Create a filter that matches every scenario.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a product category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Accept a sales channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channels.push(channel.into());
        self
    }

    /// Accept a lifecycle stage.
    pub fn with_lifecycle(mut self, stage: LifecycleStage) -> Self {
        self.lifecycle_stages.push(stage);
        self
    }

    /// Require ROI of at least `pct` percent.
    pub fn with_min_roi(mut self, pct: f64) -> Self {
        self.min_roi = Some(pct);
        self
    }

    /// Require an ROI score of at least `score`.
    pub fn with_min_score(mut self, score: f64) -> Self {
        self.min_score = Some(score);
        self
    }

    /// Check whether the filter matches everything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the filter against one scenario.
    pub fn matches(&self, row: &EvaluatedScenario<'_>) -> bool {
        let inputs = row.inputs;
        if !self.categories.is_empty()
            && !contains_ignore_case(&self.categories, &inputs.product_category)
        {
            return false;
        }
        if !self.channels.is_empty() && !contains_ignore_case(&self.channels, &inputs.sales_channel) {
            return false;
        }
        if !self.lifecycle_stages.is_empty()
            && !self.lifecycle_stages.contains(&inputs.product_lifecycle_stage)
        {
            return false;
        }
        at_least(row.metrics.roi_pct, self.min_roi) && at_least(row.metrics.score, self.min_score)
    }
}

fn contains_ignore_case(accepted: &[String], value: &str) -> bool {
    accepted.iter().any(|a| a.eq_ignore_ascii_case(value))
}

fn at_least(metric: Metric, threshold: Option<f64>) -> bool {
    match threshold {
        None => true,
        Some(min) => metric.value().is_some_and(|v| v >= min),
    }
}

/// Summary statistics over a group of scenarios.
///
/// Means are taken over the scenarios where the metric is applicable; a mean
/// over no applicable values is itself not applicable.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    /// Number of scenarios in the group
    pub count: usize,
    /// Sum of development costs
    pub total_development_cost: f64,
    /// Sum of annual net benefits
    pub total_annual_net_benefit: f64,
    /// Sum of NPVs
    pub total_npv: f64,
    /// Simple mean ROI in percent
    pub mean_roi: Metric,
    /// Development-cost-weighted mean ROI in percent
    pub weighted_roi: Metric,
    /// Mean payback period in years
    pub mean_payback_years: Metric,
    /// Mean ROI score
    pub mean_score: Metric,
}

impl AggregateStats {
    /// Compute statistics over `rows`.
    pub fn from_rows<'r, 'a: 'r>(rows: impl IntoIterator<Item = &'r EvaluatedScenario<'a>>) -> Self {
        let mut stats = AggregateStats::default();
        let mut roi = Mean::default();
        let mut payback = Mean::default();
        let mut score = Mean::default();
        let (mut weighted_sum, mut weight_total) = (0.0, 0.0);

        for row in rows {
            let m = &row.metrics;
            stats.count += 1;
            stats.total_development_cost += row.inputs.development_cost;
            stats.total_annual_net_benefit += m.annual_net_benefit;
            stats.total_npv += m.npv;
            roi.push(m.roi_pct);
            payback.push(m.payback_period_years);
            score.push(m.score);
            if let Some(r) = m.roi_pct.value() {
                weighted_sum += r * row.inputs.development_cost;
                weight_total += row.inputs.development_cost;
            }
        }

        stats.mean_roi = roi.finish();
        stats.mean_payback_years = payback.finish();
        stats.mean_score = score.finish();
        stats.weighted_roi = Metric::when(weight_total > 0.0, || weighted_sum / weight_total);
        stats
    }
}

#[derive(Default)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn push(&mut self, metric: Metric) {
        if let Some(v) = metric.value() {
            self.sum += v;
            self.n += 1;
        }
    }

    fn finish(&self) -> Metric {
        Metric::when(self.n > 0, || self.sum / self.n as f64)
    }
}

/// One point of the ROI / payback bubble chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BubblePoint {
    /// Scenario name
    pub scenario_name: String,
    /// Payback period in years (x axis)
    pub payback_period_years: Metric,
    /// ROI in percent (y axis)
    pub roi_pct: Metric,
    /// ROI score (colour)
    pub score: Metric,
    /// Annual net benefit the size is derived from
    pub annual_net_benefit: f64,
    /// Display size
    pub size: f64,
}

/// Scale annual net benefits to display sizes.
///
/// Sizes are proportional to the largest benefit, capped at
/// [`BUBBLE_SIZE_MAX`] and floored at [`BUBBLE_SIZE_MIN`]. When no benefit is
/// positive every size is [`BUBBLE_SIZE_DEFAULT`].
pub fn bubble_sizes(annual_net_benefits: &[f64]) -> Vec<f64> {
    let max = annual_net_benefits
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    if max > 0.0 {
        annual_net_benefits
            .iter()
            .map(|net| (BUBBLE_SIZE_MAX * net / max).max(BUBBLE_SIZE_MIN))
            .collect()
    } else {
        vec![BUBBLE_SIZE_DEFAULT; annual_net_benefits.len()]
    }
}

/// Aggregate view of a (possibly filtered) portfolio.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PortfolioAggregate {
    /// Statistics over every included scenario
    pub overall: AggregateStats,
    /// Statistics per product category
    pub by_category: BTreeMap<String, AggregateStats>,
    /// Statistics per lifecycle stage
    pub by_lifecycle: BTreeMap<LifecycleStage, AggregateStats>,
    /// Scenario with the highest NPV
    pub best_npv: Option<String>,
    /// Scenario with the highest applicable ROI
    pub best_roi: Option<String>,
    /// Bubble chart points in collection order
    pub bubbles: Vec<BubblePoint>,
}

impl PortfolioAggregate {
    /// Aggregate the given rows.
    pub fn from_rows(rows: &[EvaluatedScenario<'_>]) -> Self {
        let mut categories: BTreeMap<&str, Vec<&EvaluatedScenario<'_>>> = BTreeMap::new();
        let mut stages: BTreeMap<LifecycleStage, Vec<&EvaluatedScenario<'_>>> = BTreeMap::new();
        for row in rows {
            categories
                .entry(row.inputs.product_category.as_str())
                .or_default()
                .push(row);
            stages
                .entry(row.inputs.product_lifecycle_stage)
                .or_default()
                .push(row);
        }

        let best_npv = rows
            .iter()
            .max_by(|a, b| a.metrics.npv.total_cmp(&b.metrics.npv))
            .map(|r| r.inputs.scenario_name.clone());
        let best_roi = rows
            .iter()
            .filter_map(|r| r.metrics.roi_pct.value().map(|v| (v, r)))
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, r)| r.inputs.scenario_name.clone());

        let nets: Vec<f64> = rows.iter().map(|r| r.metrics.annual_net_benefit).collect();
        let bubbles = rows
            .iter()
            .zip(bubble_sizes(&nets))
            .map(|(r, size)| BubblePoint {
                scenario_name: r.inputs.scenario_name.clone(),
                payback_period_years: r.metrics.payback_period_years,
                roi_pct: r.metrics.roi_pct,
                score: r.metrics.score,
                annual_net_benefit: r.metrics.annual_net_benefit,
                size,
            })
            .collect();

        Self {
            overall: AggregateStats::from_rows(rows),
            by_category: categories
                .into_iter()
                .map(|(k, v)| (k.to_string(), AggregateStats::from_rows(v)))
                .collect(),
            by_lifecycle: stages
                .into_iter()
                .map(|(k, v)| (k, AggregateStats::from_rows(v)))
                .collect(),
            best_npv,
            best_roi,
            bubbles,
        }
    }

    /// Check whether no scenario was included.
    pub fn is_empty(&self) -> bool {
        self.overall.count == 0
    }
}
