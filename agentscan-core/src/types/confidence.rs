//! Qualitative detection confidence.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Strength of evidence that a framework is used.
///
/// Ordered: `Low < High`, so the strongest evidence across files is `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The framework is imported but no construct usage was resolved.
    #[default]
    Low,
    /// At least one construct instantiation resolved to the framework.
    High,
}

impl Confidence {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }

    /// Whether this level passes a minimum threshold.
    pub fn meets(&self, threshold: Confidence) -> bool {
        *self >= threshold
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
