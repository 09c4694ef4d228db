//! ParserManager: routes source text to the correct language parser.

use std::path::Path;

use agentscan_core::errors::ParseError;

use super::javascript::JavaScriptParser;
use super::python::PythonParser;
use super::traits::LanguageParser;
use super::types::SourceFacts;
use crate::scanner::language_detect::Language;

/// Holds one stateless parser per supported language.
#[derive(Debug, Clone)]
pub struct ParserManager {
    python: PythonParser,
    javascript: JavaScriptParser,
    typescript: JavaScriptParser,
    tsx: JavaScriptParser,
}

impl ParserManager {
    pub fn new() -> Self {
        Self {
            python: PythonParser::new(),
            javascript: JavaScriptParser::javascript(),
            typescript: JavaScriptParser::typescript(),
            tsx: JavaScriptParser::tsx(),
        }
    }

    fn parser_for(&self, lang: Language) -> &dyn LanguageParser {
        match lang {
            Language::Python => &self.python,
            Language::JavaScript => &self.javascript,
            Language::TypeScript => &self.typescript,
            Language::Tsx => &self.tsx,
        }
    }

    /// Detect language from file extension.
    pub fn detect_language(&self, path: &Path) -> Option<Language> {
        Language::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    /// Extract facts from source in a known language.
    pub fn extract(&self, source: &str, lang: Language) -> Result<SourceFacts, ParseError> {
        self.parser_for(lang).extract(source)
    }
}

impl Default for ParserManager {
    fn default() -> Self {
        Self::new()
    }
}
