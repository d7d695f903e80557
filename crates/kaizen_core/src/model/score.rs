//! Weighted ROI score and ROI status banding.

use crate::types::Metric;
use serde::{Deserialize, Serialize};

/// Weighted 0-100 score combining ROI, break-even speed, return reduction and
/// sales increase.
///
/// `roi` is a fraction (1.5 = 150%) capped at 5. Break-even is normalised over
/// one year. The sales component only participates when the sales increase is
/// positive; the other weights grow to compensate.
pub fn roi_score(roi: f64, breakeven_days: f64, reduction_pct: f64, sales_increase_pct: f64) -> f64 {
    let breakeven_score = (1.0 - breakeven_days / 365.0).max(0.0);
    let roi_component = (roi / 5.0).min(1.0);
    let reduction_score = reduction_pct / 100.0;

    let weighted = if sales_increase_pct > 0.0 {
        let sales_score = (sales_increase_pct / 50.0).min(1.0);
        roi_component * 0.4 + breakeven_score * 0.3 + reduction_score * 0.15 + sales_score * 0.15
    } else {
        roi_component * 0.5 + breakeven_score * 0.35 + reduction_score * 0.15
    };

    weighted * 100.0
}

/// Qualitative banding of ROI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoiStatus {
    /// ROI above 150%
    Positive,
    /// ROI above 50%, or not applicable
    Neutral,
    /// ROI at or below 50%
    Negative,
}

impl RoiStatus {
    /// Classify an ROI percentage.
    pub fn from_roi(roi_pct: Metric) -> Self {
        match roi_pct.value() {
            None => RoiStatus::Neutral,
            Some(roi) if roi > 150.0 => RoiStatus::Positive,
            Some(roi) if roi > 50.0 => RoiStatus::Neutral,
            Some(_) => RoiStatus::Negative,
        }
    }

    /// Get the display label.
    pub fn label(&self) -> &'static str {
        match self {
            RoiStatus::Positive => "positive",
            RoiStatus::Neutral => "neutral",
            RoiStatus::Negative => "negative",
        }
    }
}
