//! Framework registry configuration.

use serde::{Deserialize, Serialize};

use crate::types::framework_spec::FrameworkSpec;

/// Controls which framework packs the registry loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegistryConfig {
    /// Load the built-in packs. Default: true.
    pub include_builtins: Option<bool>,
    /// Built-in pack ids to skip.
    pub disabled: Vec<String>,
    /// If set, only these built-in pack ids are loaded.
    pub enabled_only: Option<Vec<String>>,
    /// Directory of additional `*.toml` packs.
    pub custom_packs_dir: Option<String>,
    /// Inline packs. A pack whose id matches a built-in replaces it.
    pub frameworks: Vec<FrameworkSpec>,
}

impl RegistryConfig {
    /// Returns whether built-in packs are loaded, defaulting to true.
    pub fn effective_include_builtins(&self) -> bool {
        self.include_builtins.unwrap_or(true)
    }

    /// Whether a built-in pack id is filtered out by `enabled_only`/`disabled`.
    pub fn is_builtin_disabled(&self, id: &str) -> bool {
        if let Some(ref enabled) = self.enabled_only {
            return !enabled.iter().any(|e| e == id);
        }
        self.disabled.iter().any(|d| d == id)
    }
}
