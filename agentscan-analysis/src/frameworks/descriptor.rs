//! Compiled framework descriptors.

use agentscan_core::ConstructRole;
use regex::Regex;

use crate::scanner::language_detect::Language;

/// A framework the registry can detect. Immutable once registered.
#[derive(Debug, Clone)]
pub struct FrameworkDescriptor {
    pub id: String,
    pub name: String,
    /// Empty means every supported language.
    pub languages: Vec<Language>,
    pub version: Option<String>,
    pub import_signatures: Vec<ImportSignature>,
    pub construct_signatures: Vec<ConstructSignature>,
}

/// Module path pattern plus an optional specific symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSignature {
    pub module: String,
    /// `None` admits any symbol.
    pub symbol: Option<String>,
}

impl ImportSignature {
    /// The path equals the pattern or continues it with a `.` or `/` segment.
    pub fn matches_module(&self, module_path: &str) -> bool {
        match module_path.strip_prefix(self.module.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('.') || rest.starts_with('/'),
            None => false,
        }
    }

    /// Whether a resolved `(module, symbol)` pair falls under this signature.
    pub fn admits(&self, module_path: &str, symbol: &str) -> bool {
        self.matches_module(module_path)
            && self.symbol.as_deref().map_or(true, |s| s == symbol)
    }
}

/// Construct symbol name, exact or `*`-glob.
#[derive(Debug, Clone)]
pub enum SymbolPattern {
    Exact(String),
    Glob { pattern: String, regex: Regex },
}

impl SymbolPattern {
    pub fn matches(&self, symbol: &str) -> bool {
        match self {
            Self::Exact(name) => name == symbol,
            Self::Glob { regex, .. } => regex.is_match(symbol),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(name) => name,
            Self::Glob { pattern, .. } => pattern,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConstructSignature {
    pub symbol: SymbolPattern,
    pub role: ConstructRole,
}

impl FrameworkDescriptor {
    pub fn supports_language(&self, language: Language) -> bool {
        self.languages.is_empty() || self.languages.iter().any(|l| l.covers(language))
    }

    /// Whether any import signature matches the module path.
    pub fn matches_module(&self, module_path: &str) -> bool {
        self.import_signatures
            .iter()
            .any(|sig| sig.matches_module(module_path))
    }

    /// Most specific import signature admitting `(module, symbol)`:
    /// exact symbol over any-symbol, then longer module pattern.
    pub fn best_import_signature(
        &self,
        module_path: &str,
        symbol: &str,
    ) -> Option<&ImportSignature> {
        self.import_signatures
            .iter()
            .filter(|sig| sig.admits(module_path, symbol))
            .max_by_key(|sig| (sig.symbol.is_some(), sig.module.len()))
    }

    /// Construct signature for `symbol`, preferring an exact name over a glob.
    pub fn construct_for(&self, symbol: &str) -> Option<&ConstructSignature> {
        let mut glob_hit = None;
        for sig in &self.construct_signatures {
            if !sig.symbol.matches(symbol) {
                continue;
            }
            if sig.symbol.is_exact() {
                return Some(sig);
            }
            glob_hit.get_or_insert(sig);
        }
        glob_hit
    }
}
