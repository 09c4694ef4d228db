//! Core types for the detection engine.

use agentscan_core::ConstructRole;
use serde::Serialize;

use crate::parsers::types::SiteKind;

/// A construct site attributed to a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub framework_id: String,
    pub role: ConstructRole,
    /// Callee as written at the site.
    pub local_alias: String,
    /// Resolved framework symbol.
    pub symbol: String,
    /// Resolved module path.
    pub module_path: String,
    pub line: u32,
    pub column: u32,
    pub site: SiteKind,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambiguity: Option<AmbiguousMatchWarning>,
}

/// Set when several frameworks tied for the same site. Not an error: the
/// match is kept and flagged for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousMatchWarning {
    /// The other frameworks that tied, sorted.
    pub alternatives: Vec<String>,
}

/// An import binding that matched a framework's import signature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ImportEvidence {
    pub framework_id: String,
    pub module_path: String,
    pub local_alias: String,
    pub line: u32,
}

/// What a callee chain refers to after resolution through the import table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A module object (`import a.b` then `a.b`); never a construct by itself.
    Module(String),
    /// A member of a module.
    Symbol { module_path: String, symbol: String },
}

/// Shorten a source line for display, cutting on a char boundary.
pub(crate) fn truncate_snippet(line: &str, max_len: usize) -> String {
    let line = line.trim();
    if line.chars().count() <= max_len {
        return line.to_string();
    }
    const ELLIPSIS: &str = "...";
    let keep = max_len.saturating_sub(ELLIPSIS.len()).max(1);
    let mut out: String = line.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
