//! Derived values that may be undefined.
//!
//! Ratios such as ROI or payback period have no meaning when the denominator
//! is zero or the net benefit is not positive. Those cases are carried as
//! `Metric::NotApplicable` / `BreakEven::Never` so that aggregation, export and
//! display never have to special-case infinities or NaN.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A derived metric value, or an explicit "not applicable" marker.
///
/// Serialises as a plain number, or `null` when not applicable.
///
/// # Examples
/// ```
/// use kaizen_core::types::Metric;
///
/// let roi = Metric::when(true, || 164.16);
/// assert_eq!(roi.value(), Some(164.16));
///
/// let undefined = Metric::when(false, || 1.0 / 0.0);
/// assert!(!undefined.is_applicable());
/// assert_eq!(format!("{}", undefined), "N/A");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Metric {
    /// A defined value
    Value(f64),
    /// The computation is undefined for these inputs
    #[default]
    NotApplicable,
}

impl Metric {
    /// Evaluate `f` only when `defined` holds.
    #[inline]
    pub fn when(defined: bool, f: impl FnOnce() -> f64) -> Self {
        if defined {
            Metric::Value(f())
        } else {
            Metric::NotApplicable
        }
    }

    /// Get the value, if defined.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::NotApplicable => None,
        }
    }

    /// Check whether the metric is defined.
    #[inline]
    pub fn is_applicable(&self) -> bool {
        matches!(self, Metric::Value(_))
    }

    /// Apply `f` to a defined value.
    #[inline]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Metric::Value(v) => Metric::Value(f(v)),
            Metric::NotApplicable => Metric::NotApplicable,
        }
    }

    /// Combine two metrics; the result is defined only when both are.
    #[inline]
    pub fn zip_with(self, other: Metric, f: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Metric::Value(a), Metric::Value(b)) => Metric::Value(f(a, b)),
            _ => Metric::NotApplicable,
        }
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Metric::Value(v),
            None => Metric::NotApplicable,
        }
    }
}

impl From<Metric> for Option<f64> {
    fn from(metric: Metric) -> Self {
        metric.value()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{:.2}", v),
            },
            Metric::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Month (counted from project start) at which cumulative benefit covers the
/// development cost, or `Never` when the upgrade does not pay back.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum BreakEven {
    /// Break-even reached at this month
    Month(f64),
    /// Net benefit is not positive
    #[default]
    Never,
}

impl BreakEven {
    /// Get the break-even month, if reached.
    #[inline]
    pub fn month(&self) -> Option<f64> {
        match self {
            BreakEven::Month(m) => Some(*m),
            BreakEven::Never => None,
        }
    }

    /// Check whether break-even is ever reached.
    #[inline]
    pub fn is_reached(&self) -> bool {
        matches!(self, BreakEven::Month(_))
    }
}

impl From<Option<f64>> for BreakEven {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(m) => BreakEven::Month(m),
            None => BreakEven::Never,
        }
    }
}

impl From<BreakEven> for Option<f64> {
    fn from(b: BreakEven) -> Self {
        b.month()
    }
}

impl From<BreakEven> for Metric {
    fn from(b: BreakEven) -> Self {
        b.month().into()
    }
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEven::Month(m) => write!(f, "{:.1} months", m),
            BreakEven::Never => write!(f, "Never"),
        }
    }
}
