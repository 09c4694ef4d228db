//! Registry diagnostics: what was loaded, overridden, and skipped.

use std::collections::BTreeMap;

/// Load-time counters for a `FrameworkRegistry`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryDiagnostics {
    pub builtin_packs_loaded: usize,
    pub builtin_packs_disabled: usize,
    pub inline_packs_loaded: usize,
    pub custom_packs_loaded: usize,
    pub packs_overridden: usize,
    pub import_signatures: usize,
    pub construct_signatures: usize,
    /// Framework id → pack version, for packs that declare one.
    pub pack_versions: BTreeMap<String, String>,
}

impl RegistryDiagnostics {
    pub fn total_packs(&self) -> usize {
        (self.builtin_packs_loaded + self.inline_packs_loaded + self.custom_packs_loaded)
            .saturating_sub(self.packs_overridden)
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "framework registry: {} packs ({} builtin, {} inline, {} custom, {} overridden, {} disabled), \
             {} import signatures, {} construct signatures",
            self.total_packs(),
            self.builtin_packs_loaded,
            self.inline_packs_loaded,
            self.custom_packs_loaded,
            self.packs_overridden,
            self.builtin_packs_disabled,
            self.import_signatures,
            self.construct_signatures,
        )
    }
}
