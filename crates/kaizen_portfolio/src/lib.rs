//! # Kaizen Portfolio (P: Portfolio)
//!
//! The scenario engine: an ordered collection of upgrade scenarios keyed by
//! name, with derived metrics recomputed on every read.
//!
//! This crate provides:
//! - `ScenarioEngine`: add / update / delete / clear / clone / compare
//! - What-if analysis over input deltas, with per-metric change reports
//! - Portfolio aggregation with filters and category / lifecycle groupings
//! - Bundled example scenarios
//! - JSON serialisation of the collection
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          kaizen_portfolio (P)           │
//! ├─────────────────────────────────────────┤
//! │  engine     - ScenarioEngine            │
//! │  whatif     - WhatIfDeltas, results     │
//! │  aggregate  - filters, group stats      │
//! │  presets    - example scenarios         │
//! │  codec      - JSON records              │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │             kaizen_core (K)             │
//! │  ScenarioInputs, compute_metrics        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use kaizen_portfolio::{ScenarioEngine, WhatIfDeltas};
//!
//! let mut engine = ScenarioEngine::new();
//! assert_eq!(engine.add_examples(), 3);
//!
//! let deltas = WhatIfDeltas {
//!     development_cost_pct: 20.0,
//!     ..WhatIfDeltas::default()
//! };
//! let result = engine.what_if("Size Verification Enhancement", &deltas).unwrap();
//! assert!(result.adjusted.npv < result.original.npv);
//!
//! // The base scenario is untouched
//! assert_eq!(engine.get("Size Verification Enhancement").unwrap().development_cost, 7500.0);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregate;
pub mod codec;
pub mod engine;
pub mod error;
pub mod presets;
pub mod whatif;

// Re-export commonly used types
pub use aggregate::{
    bubble_sizes, AggregateStats, BubblePoint, PortfolioAggregate, ScenarioFilter,
};
pub use engine::{EvaluatedScenario, ScenarioEngine};
pub use error::{EngineError, Result};
pub use presets::example_scenarios;
pub use whatif::{what_if, MetricChange, WhatIfDeltas, WhatIfResult};
