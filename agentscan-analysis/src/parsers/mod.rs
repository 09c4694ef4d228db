//! Lexical import extraction and the structural call-site view.
//!
//! Each language parser turns source text into a `SourceFacts`: ordered import
//! bindings, call/instantiation/decorator sites, and module-level scope events.

pub mod javascript;
pub mod manager;
pub mod python;
pub(crate) mod syntax;
pub mod traits;
pub mod types;

pub use manager::ParserManager;
pub use traits::LanguageParser;
pub use types::{ImportBinding, ImportedSymbol, SourceFacts};

use agentscan_core::errors::ParseError;

use crate::scanner::language_detect::Language;

/// Ordered import bindings of one file.
pub fn extract_imports(source: &str, language: Language) -> Result<Vec<ImportBinding>, ParseError> {
    ParserManager::new()
        .extract(source, language)
        .map(|facts| facts.imports)
}
