//! Product lifecycle stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stage of the product in its market lifecycle.
///
/// Deserialisation accepts any casing, like [`FromStr`].
///
/// # Examples
/// ```
/// use kaizen_core::types::LifecycleStage;
///
/// let stage: LifecycleStage = "maturity".parse().unwrap();
/// assert_eq!(stage, LifecycleStage::Maturity);
/// assert_eq!(stage.to_string(), "Maturity");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum LifecycleStage {
    /// Newly launched product
    Introduction,
    /// Sales volume still expanding
    #[default]
    Growth,
    /// Stable, saturated demand
    Maturity,
    /// Demand falling off
    Decline,
}

impl LifecycleStage {
    /// All stages in lifecycle order.
    pub const ALL: [LifecycleStage; 4] = [
        LifecycleStage::Introduction,
        LifecycleStage::Growth,
        LifecycleStage::Maturity,
        LifecycleStage::Decline,
    ];

    /// Get the display name of this stage.
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleStage::Introduction => "Introduction",
            LifecycleStage::Growth => "Growth",
            LifecycleStage::Maturity => "Maturity",
            LifecycleStage::Decline => "Decline",
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a lifecycle stage name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown lifecycle stage: {0}. Expected one of: Introduction, Growth, Maturity, Decline")]
pub struct ParseLifecycleError(pub String);

impl FromStr for LifecycleStage {
    type Err = ParseLifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "introduction" => Ok(LifecycleStage::Introduction),
            "growth" => Ok(LifecycleStage::Growth),
            "maturity" => Ok(LifecycleStage::Maturity),
            "decline" => Ok(LifecycleStage::Decline),
            _ => Err(ParseLifecycleError(s.to_string())),
        }
    }
}

impl TryFrom<String> for LifecycleStage {
    type Error = ParseLifecycleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
