//! Discounted cash-flow valuation of a scenario.
//!
//! The projected stream is monthly: nothing while the upgrade is being
//! implemented, then the monthly net benefit (scaled by the adoption curve
//! during ramp-up). Each month is discounted at the monthly-equivalent of the
//! annual rate, and the development cost is subtracted up front.

use super::adoption::{AdoptionCurve, DEFAULT_RAMP_MONTHS};
use super::metrics::MonthlyFlows;
use crate::scenario::ScenarioInputs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default annual discount rate (10%).
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Default projection horizon in months (3 years).
pub const DEFAULT_HORIZON_MONTHS: u32 = 36;

/// Longest accepted projection horizon in months.
pub const MAX_HORIZON_MONTHS: u32 = 1200;

/// Valuation parameters that would make the projection meaningless.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// Discount rate is NaN, infinite, or at or below -100%.
    #[error("discount_rate {0} must be a finite annual rate above -1")]
    DiscountRate(f64),

    /// Zero-month horizon.
    #[error("horizon_months must be greater than 0")]
    EmptyHorizon,

    /// Horizon beyond [`MAX_HORIZON_MONTHS`].
    #[error("horizon_months {0} exceeds maximum allowed (1200)")]
    HorizonTooLong(u32),

    /// Zero-month ramp.
    #[error("ramp_months must be greater than 0")]
    EmptyRamp,
}

/// Parameters of the NPV projection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationParams {
    /// Annual discount rate as a fraction (0.10 = 10%)
    pub discount_rate: f64,
    /// Number of projected months
    pub horizon_months: u32,
    /// Ramp-up shape after launch
    pub adoption_curve: AdoptionCurve,
    /// Length of the ramp-up in months
    pub ramp_months: u32,
}

impl Default for ValuationParams {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            adoption_curve: AdoptionCurve::Immediate,
            ramp_months: DEFAULT_RAMP_MONTHS,
        }
    }
}

impl ValuationParams {
    /// Override the annual discount rate.
    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    /// Override the horizon.
    pub fn with_horizon_months(mut self, months: u32) -> Self {
        self.horizon_months = months;
        self
    }

    /// Override the adoption curve and its ramp length.
    pub fn with_adoption(mut self, curve: AdoptionCurve, ramp_months: u32) -> Self {
        self.adoption_curve = curve;
        self.ramp_months = ramp_months;
        self
    }

    /// Every problem with these parameters, in field order.
    pub fn problems(&self) -> Vec<ValuationError> {
        let mut problems = Vec::new();
        if !self.discount_rate.is_finite() || self.discount_rate <= -1.0 {
            problems.push(ValuationError::DiscountRate(self.discount_rate));
        }
        if self.horizon_months == 0 {
            problems.push(ValuationError::EmptyHorizon);
        } else if self.horizon_months > MAX_HORIZON_MONTHS {
            problems.push(ValuationError::HorizonTooLong(self.horizon_months));
        }
        if self.ramp_months == 0 {
            problems.push(ValuationError::EmptyRamp);
        }
        problems
    }

    /// Check the parameters, returning the first problem found.
    pub fn validate(&self) -> Result<(), ValuationError> {
        match self.problems().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }

    /// Monthly rate equivalent to the annual discount rate.
    pub fn monthly_rate(&self) -> f64 {
        (1.0 + self.discount_rate).powf(1.0 / 12.0) - 1.0
    }
}

/// Project the undiscounted monthly net cash flows, month 1 first.
pub fn project_cash_flows(inputs: &ScenarioInputs, params: &ValuationParams) -> Vec<f64> {
    let mut elapsed: u32 = 0;
    (1..=params.horizon_months)
        .map(|month| {
            if (month as f64) <= inputs.time_to_implement {
                return 0.0;
            }
            let share = params.adoption_curve.factor(elapsed, params.ramp_months);
            elapsed += 1;
            MonthlyFlows::with_adoption(inputs, share).net_benefit
        })
        .collect()
}

/// Net present value of the projected stream, net of development cost.
pub fn npv(inputs: &ScenarioInputs, params: &ValuationParams) -> f64 {
    let growth = 1.0 + params.monthly_rate();
    let mut discount = 1.0;
    let mut pv = 0.0;
    for cash_flow in project_cash_flows(inputs, params) {
        discount /= growth;
        pv += cash_flow * discount;
    }
    pv - inputs.development_cost
}
