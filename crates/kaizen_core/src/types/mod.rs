//! Core value types shared by every KaizenROI crate.
//!
//! This module provides:
//! - `Metric`: a derived value that may be not applicable
//! - `BreakEven`: break-even timing in months, or never
//! - `LifecycleStage`: product lifecycle classification
//! - `ValidationError`: input validation failures

mod error;
mod lifecycle;
mod metric;

pub use error::ValidationError;
pub use lifecycle::{LifecycleStage, ParseLifecycleError};
pub use metric::{BreakEven, Metric};
