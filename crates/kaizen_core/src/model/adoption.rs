//! Adoption curves for the post-launch ramp-up of an upgrade.
//!
//! A curve maps the months elapsed since the upgrade went live to the share
//! (0..=1) of the target return reduction and sales increase realised that
//! month. After the ramp period the full effect applies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default ramp-up length in months.
pub const DEFAULT_RAMP_MONTHS: u32 = 12;

/// Shape of the ramp from zero to full effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionCurve {
    /// Full effect from the first live month
    #[default]
    Immediate,
    /// Straight line from 0 to 1
    Linear,
    /// Logistic curve over [-3, 3], rescaled to [0, 1]
    SCurve,
    /// Square-root ramp: rapid early adoption, slower later
    FastInitial,
}

impl AdoptionCurve {
    /// Get the configuration name of this curve.
    pub fn name(&self) -> &'static str {
        match self {
            AdoptionCurve::Immediate => "immediate",
            AdoptionCurve::Linear => "linear",
            AdoptionCurve::SCurve => "s_curve",
            AdoptionCurve::FastInitial => "fast_initial",
        }
    }

    /// Share of the full effect realised `elapsed` months after launch.
    ///
    /// The ramp samples `ramp_months` evenly spaced points from 0 to 1, so the
    /// first live month sits at 0 and month `ramp_months - 1` reaches 1.
    pub fn factor(&self, elapsed: u32, ramp_months: u32) -> f64 {
        if matches!(self, AdoptionCurve::Immediate) || elapsed.saturating_add(1) >= ramp_months {
            return 1.0;
        }
        let t = elapsed as f64 / (ramp_months - 1) as f64;
        match self {
            AdoptionCurve::Immediate => 1.0,
            AdoptionCurve::Linear => t,
            AdoptionCurve::SCurve => {
                let logistic = |x: f64| 1.0 / (1.0 + (-x).exp());
                let lo = logistic(-3.0);
                let hi = logistic(3.0);
                (logistic(-3.0 + 6.0 * t) - lo) / (hi - lo)
            }
            AdoptionCurve::FastInitial => t.sqrt(),
        }
    }
}

impl fmt::Display for AdoptionCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdoptionCurve {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "immediate" => Ok(AdoptionCurve::Immediate),
            "linear" => Ok(AdoptionCurve::Linear),
            "s_curve" | "scurve" => Ok(AdoptionCurve::SCurve),
            "fast_initial" => Ok(AdoptionCurve::FastInitial),
            other => Err(format!(
                "Unknown adoption curve: {}. Supported: immediate, linear, s_curve, fast_initial",
                other
            )),
        }
    }
}
