//! Per-file parse errors.

use super::error_code::{self, AgentScanErrorCode};

/// A single file could not be tokenized for import/construct analysis.
///
/// Fatal only for that file's finding; other files are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    #[error("Failed to load {language} grammar: {message}")]
    GrammarLoad { language: String, message: String },

    #[error("Parser produced no syntax tree for {language} source")]
    NoTree { language: String },

    #[error("Malformed import statement at {line}:{column}: {text}")]
    MalformedImport { line: u32, column: u32, text: String },

    #[error("Source is not valid {language}")]
    InvalidSource { language: String },
}

impl AgentScanErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::PARSE_UNSUPPORTED_LANGUAGE,
            Self::GrammarLoad { .. } => error_code::PARSE_GRAMMAR_LOAD,
            Self::NoTree { .. } => error_code::PARSE_NO_TREE,
            Self::MalformedImport { .. } => error_code::PARSE_MALFORMED_IMPORT,
            Self::InvalidSource { .. } => error_code::PARSE_INVALID_SOURCE,
        }
    }
}
