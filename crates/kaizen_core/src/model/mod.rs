//! The product-upgrade financial model.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               compute_metrics                │
//! ├──────────────────────────────────────────────┤
//! │  MonthlyFlows     - steady-state monthly P&L │
//! │  ValuationParams  - discount rate, horizon   │
//! │  AdoptionCurve    - post-launch ramp-up      │
//! │  roi_score        - weighted 0-100 ranking   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure: identical inputs give identical outputs.

mod adoption;
mod metrics;
mod score;
mod valuation;

pub use adoption::{AdoptionCurve, DEFAULT_RAMP_MONTHS};
pub use metrics::{compute_metrics, MonthlyFlows, ScenarioMetrics};
pub use score::{roi_score, RoiStatus};
pub use valuation::{
    npv, project_cash_flows, ValuationError, ValuationParams, DEFAULT_DISCOUNT_RATE,
    DEFAULT_HORIZON_MONTHS, MAX_HORIZON_MONTHS,
};
