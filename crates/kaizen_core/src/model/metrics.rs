//! Derived metrics of a scenario.
//!
//! The formulas are applied in a fixed order; see [`compute_metrics`].

use super::score::roi_score;
use super::valuation::{npv, ValuationParams};
use crate::scenario::ScenarioInputs;
use crate::types::{BreakEven, Metric};
use serde::{Deserialize, Serialize};

/// Steady-state monthly flows for a given return reduction and sales increase.
///
/// The additional-cost volume basis is sold units, minus returns that still
/// happen, plus former returns now kept, plus incremental sales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonthlyFlows {
    /// Returns avoided per month
    pub avoided_returns: f64,
    /// Value recovered per avoided return
    pub savings_per_avoided_unit: f64,
    /// Savings from avoided returns
    pub return_savings: f64,
    /// Incremental units sold per month
    pub additional_sales: f64,
    /// Unit margin after the cost change
    pub margin_after_upgrade: f64,
    /// Margin earned on incremental sales
    pub sales_benefit: f64,
    /// Unit-cost delta applied across post-upgrade volume
    pub additional_costs: f64,
    /// Return savings + sales benefit - additional costs
    pub net_benefit: f64,
}

impl MonthlyFlows {
    /// Compute flows for explicit percentages (percent units).
    pub fn compute(inputs: &ScenarioInputs, return_reduction_pct: f64, sales_increase_pct: f64) -> Self {
        let avoided_returns = inputs.current_returns * (return_reduction_pct / 100.0);
        let savings_per_avoided_unit = inputs.avg_sale_price
            + inputs.effective_return_processing_cost()
            - inputs.current_unit_cost;
        let return_savings = avoided_returns * savings_per_avoided_unit;

        let additional_sales = inputs.current_unit_sales * (sales_increase_pct / 100.0);
        let margin_after_upgrade =
            inputs.avg_sale_price - (inputs.current_unit_cost + inputs.unit_cost_change);
        let sales_benefit = additional_sales * margin_after_upgrade;

        let additional_costs = inputs.unit_cost_change
            * (inputs.current_unit_sales - inputs.current_returns
                + avoided_returns
                + additional_sales);

        Self {
            avoided_returns,
            savings_per_avoided_unit,
            return_savings,
            additional_sales,
            margin_after_upgrade,
            sales_benefit,
            additional_costs,
            net_benefit: return_savings + sales_benefit - additional_costs,
        }
    }

    /// Compute flows at full effect.
    pub fn steady_state(inputs: &ScenarioInputs) -> Self {
        Self::compute(inputs, inputs.return_reduction_pct, inputs.sales_increase_pct)
    }

    /// Compute flows with `share` (0..=1) of the target effect realised.
    pub fn with_adoption(inputs: &ScenarioInputs, share: f64) -> Self {
        Self::compute(
            inputs,
            inputs.return_reduction_pct * share,
            inputs.sales_increase_pct * share,
        )
    }
}

/// Every derived metric of a scenario.
///
/// Recomputed from inputs on every read; never the source of truth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    /// Returns as a percentage of sales (0 when there are no sales)
    pub return_rate: f64,
    /// Returns avoided per month
    pub avoided_returns_monthly: f64,
    /// Returns avoided per year (from annual returns)
    pub avoided_returns_annual: f64,
    /// Value recovered per avoided return
    pub savings_per_avoided_unit: f64,
    /// Monthly savings from avoided returns
    pub monthly_return_savings: f64,
    /// Annual savings from avoided returns
    pub annual_return_savings: f64,
    /// Incremental units sold per month
    pub additional_sales_monthly: f64,
    /// Unit cost after the upgrade
    pub new_unit_cost: f64,
    /// Unit margin before the upgrade
    pub margin_before: f64,
    /// Unit margin after the upgrade
    pub margin_after_upgrade: f64,
    /// Monthly margin on incremental sales
    pub monthly_sales_benefit: f64,
    /// Annual margin on incremental sales
    pub annual_sales_benefit: f64,
    /// Monthly cost of the unit-cost change
    pub additional_costs_monthly: f64,
    /// Annual cost of the unit-cost change
    pub additional_costs_annual: f64,
    /// Monthly cost of current returns (unit cost + processing)
    pub return_cost_monthly: f64,
    /// Annual cost of current returns
    pub return_cost_annual: f64,
    /// Monthly revenue given back on returns
    pub revenue_impact_monthly: f64,
    /// Annual revenue given back on returns
    pub revenue_impact_annual: f64,
    /// Net monthly benefit of the upgrade
    pub monthly_net_benefit: f64,
    /// Net annual benefit (monthly x 12)
    pub annual_net_benefit: f64,
    /// Annual net benefit over development cost, in percent
    pub roi_pct: Metric,
    /// Years to recover the development cost
    pub payback_period_years: Metric,
    /// Net present value of the projected stream
    pub npv: f64,
    /// Implementation time plus payback, in months
    pub breakeven_month: BreakEven,
    /// Weighted 0-100 ranking score
    pub score: Metric,
}

/// Compute every derived metric of a scenario.
///
/// ROI is defined only when the development cost and annual net benefit are
/// both positive; payback and break-even only when the monthly net benefit is
/// positive.
///
/// # Examples
/// ```
/// use kaizen_core::model::{compute_metrics, ValuationParams};
/// use kaizen_core::scenario::ScenarioInputs;
/// use kaizen_core::types::{BreakEven, Metric};
///
/// let losing = ScenarioInputs::builder("Costly Trim", "Lamp")
///     .current_unit_sales(100.0)
///     .avg_sale_price(30.0)
///     .current_unit_cost(10.0)
///     .unit_cost_change(5.0)
///     .development_cost(2000.0)
///     .build()
///     .unwrap();
///
/// let metrics = compute_metrics(&losing, &ValuationParams::default());
/// assert!(metrics.monthly_net_benefit < 0.0);
/// assert_eq!(metrics.roi_pct, Metric::NotApplicable);
/// assert_eq!(metrics.breakeven_month, BreakEven::Never);
/// ```
pub fn compute_metrics(inputs: &ScenarioInputs, params: &ValuationParams) -> ScenarioMetrics {
    let return_rate = if inputs.current_unit_sales == 0.0 {
        0.0
    } else {
        (inputs.current_returns / inputs.current_unit_sales) * 100.0
    };

    let flows = MonthlyFlows::steady_state(inputs);
    let monthly_net_benefit = flows.net_benefit;
    let annual_net_benefit = monthly_net_benefit * 12.0;

    let annual_returns = inputs.effective_annual_returns();
    let avoided_returns_annual = annual_returns * (inputs.return_reduction_pct / 100.0);
    let processing_cost = inputs.effective_return_processing_cost();

    let development_cost = inputs.development_cost;
    let roi_pct = Metric::when(development_cost > 0.0 && annual_net_benefit > 0.0, || {
        (annual_net_benefit / development_cost) * 100.0
    });
    let payback_period_years = Metric::when(monthly_net_benefit > 0.0, || {
        development_cost / monthly_net_benefit / 12.0
    });
    let breakeven_month: BreakEven = payback_period_years
        .value()
        .map(|years| inputs.time_to_implement + years * 12.0)
        .into();
    let score = roi_pct.zip_with(payback_period_years, |roi, payback| {
        roi_score(
            roi / 100.0,
            payback * 365.0,
            inputs.return_reduction_pct,
            inputs.sales_increase_pct,
        )
    });

    ScenarioMetrics {
        return_rate,
        avoided_returns_monthly: flows.avoided_returns,
        avoided_returns_annual,
        savings_per_avoided_unit: flows.savings_per_avoided_unit,
        monthly_return_savings: flows.return_savings,
        annual_return_savings: avoided_returns_annual * flows.savings_per_avoided_unit,
        additional_sales_monthly: flows.additional_sales,
        new_unit_cost: inputs.current_unit_cost + inputs.unit_cost_change,
        margin_before: inputs.avg_sale_price - inputs.current_unit_cost,
        margin_after_upgrade: flows.margin_after_upgrade,
        monthly_sales_benefit: flows.sales_benefit,
        annual_sales_benefit: flows.sales_benefit * 12.0,
        additional_costs_monthly: flows.additional_costs,
        additional_costs_annual: flows.additional_costs * 12.0,
        return_cost_monthly: inputs.current_returns * (inputs.current_unit_cost + processing_cost),
        return_cost_annual: annual_returns * (inputs.current_unit_cost + processing_cost),
        revenue_impact_monthly: inputs.current_returns * inputs.avg_sale_price,
        revenue_impact_annual: annual_returns * inputs.avg_sale_price,
        monthly_net_benefit,
        annual_net_benefit,
        roi_pct,
        payback_period_years,
        npv: npv(inputs, params),
        breakeven_month,
        score,
    }
}
