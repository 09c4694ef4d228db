//! Detection configuration.

use serde::{Deserialize, Serialize};

use crate::types::confidence::Confidence;

/// Default maximum snippet length, in characters.
pub const DEFAULT_SNIPPET_MAX_LEN: usize = 160;

/// Configuration for per-file detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum confidence a framework needs to appear in a finding. Default: low.
    pub confidence_threshold: Option<Confidence>,
    /// Maximum snippet length in characters. Default: 160.
    pub snippet_max_len: Option<usize>,
}

impl DetectionConfig {
    /// Returns the effective confidence threshold, defaulting to `Low`.
    pub fn effective_confidence_threshold(&self) -> Confidence {
        self.confidence_threshold.unwrap_or(Confidence::Low)
    }

    /// Returns the effective snippet length, defaulting to 160. Never zero.
    pub fn effective_snippet_max_len(&self) -> usize {
        self.snippet_max_len
            .filter(|len| *len > 0)
            .unwrap_or(DEFAULT_SNIPPET_MAX_LEN)
    }
}
