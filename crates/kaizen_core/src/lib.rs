//! # Kaizen Core (K: Kernel)
//!
//! Value types and the closed-form financial model behind KaizenROI
//! product-upgrade scenarios.
//!
//! This crate provides:
//! - `Metric` / `BreakEven`: explicit "not applicable" results instead of float sentinels
//! - `ScenarioInputs`: the stored inputs of one upgrade scenario, with validation
//! - `compute_metrics`: the pure formula engine (ROI, payback, NPV, break-even)
//! - Adoption curves and the discounted monthly cash-flow projection
//! - The weighted ROI score used for portfolio ranking
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            kaizen_core (K)              │
//! ├─────────────────────────────────────────┤
//! │  types/     - Metric, BreakEven,        │
//! │               LifecycleStage, errors    │
//! │  scenario/  - ScenarioInputs + builder  │
//! │  model/     - metrics, valuation (NPV), │
//! │               adoption, score           │
//! └─────────────────────────────────────────┘
//!          ↑
//! ┌─────────────────────────────────────────┐
//! │         kaizen_portfolio (P)            │
//! │  ScenarioEngine, what-if, aggregation   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use kaizen_core::model::{compute_metrics, ValuationParams};
//! use kaizen_core::scenario::ScenarioInputs;
//!
//! let inputs = ScenarioInputs::builder("Packaging Refresh", "Ceramic Mug")
//!     .current_unit_sales(1000.0)
//!     .current_returns(80.0)
//!     .avg_sale_price(50.0)
//!     .current_unit_cost(20.0)
//!     .return_processing_cost(8.0)
//!     .development_cost(10_000.0)
//!     .unit_cost_change(1.0)
//!     .return_reduction_pct(30.0)
//!     .sales_increase_pct(5.0)
//!     .build()
//!     .unwrap();
//!
//! let metrics = compute_metrics(&inputs, &ValuationParams::default());
//! assert!((metrics.monthly_net_benefit - 1368.0).abs() < 1e-9);
//! assert!(metrics.roi_pct.is_applicable());
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod model;
pub mod scenario;
pub mod types;

// Re-export commonly used types
pub use model::{
    compute_metrics, AdoptionCurve, RoiStatus, ScenarioMetrics, ValuationError, ValuationParams,
};
pub use scenario::{ScenarioInputs, ScenarioInputsBuilder};
pub use types::{BreakEven, LifecycleStage, Metric, ValidationError};
