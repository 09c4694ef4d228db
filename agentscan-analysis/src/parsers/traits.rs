//! LanguageParser trait.

use agentscan_core::errors::ParseError;

use super::types::SourceFacts;
use crate::scanner::language_detect::Language;

/// Extracts import bindings and structural facts from one language's source.
///
/// Implementations hold no per-file state; a fresh tree-sitter parser is
/// created for every call.
pub trait LanguageParser: Send + Sync {
    fn language(&self) -> Language;

    fn extract(&self, source: &str) -> Result<SourceFacts, ParseError>;
}
