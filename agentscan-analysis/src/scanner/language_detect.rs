//! Language detection from file extensions and language ids.

use std::str::FromStr;

use agentscan_core::errors::ParseError;
use serde::{Deserialize, Serialize};

/// Source languages the engine can tokenize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Tsx,
}

impl Language {
    /// Detect language from a file extension (without the dot).
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        match ext? {
            "py" | "pyi" => Some(Self::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Language id as written in framework packs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    /// Whether a pack targeting `self` applies to a file in `file_language`.
    ///
    /// TypeScript packs cover TSX files.
    pub fn covers(&self, file_language: Language) -> bool {
        *self == file_language || (*self == Self::TypeScript && file_language == Self::Tsx)
    }

    /// Get the tree-sitter grammar for this language.
    pub fn ts_language(&self) -> tree_sitter::Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "javascript" | "js" | "jsx" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            _ => Err(ParseError::UnsupportedLanguage {
                language: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_extensions() {
        assert_eq!(Language::from_extension(Some("py")), Some(Language::Python));
        assert_eq!(Language::from_extension(Some("mjs")), Some(Language::JavaScript));
        assert_eq!(Language::from_extension(Some("tsx")), Some(Language::Tsx));
        assert_eq!(Language::from_extension(Some("rs")), None);
        assert_eq!(Language::from_extension(None), None);
    }

    #[test]
    fn typescript_covers_tsx() {
        assert!(Language::TypeScript.covers(Language::Tsx));
        assert!(!Language::Tsx.covers(Language::TypeScript));
        assert!(!Language::JavaScript.covers(Language::TypeScript));
    }

    #[test]
    fn unknown_language_id_is_unsupported() {
        let err = "cobol".parse::<Language>().unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedLanguage { .. }));
    }
}
