//! Detector: the per-file pipeline.
//!
//! text → import extraction + structural view → construct matching →
//! `FileFinding`. Pure given an immutable registry; safe to share across
//! threads.

use std::path::Path;
use std::sync::Arc;

use agentscan_core::config::{AgentScanConfig, DetectionConfig};
use agentscan_core::errors::{ConfigurationError, ParseError};
use tracing::{debug, warn};

use super::matcher::ConstructMatcher;
use crate::aggregation::file_finding::FileFinding;
use crate::frameworks::registry::FrameworkRegistry;
use crate::parsers::manager::ParserManager;
use crate::scanner::language_detect::Language;

#[derive(Debug, Clone)]
pub struct Detector {
    registry: Arc<FrameworkRegistry>,
    config: DetectionConfig,
    parsers: ParserManager,
}

impl Detector {
    pub fn new(registry: Arc<FrameworkRegistry>, config: DetectionConfig) -> Self {
        Self {
            registry,
            config,
            parsers: ParserManager::new(),
        }
    }

    /// Built-in registry, default detection settings.
    pub fn with_builtins() -> Self {
        Self::new(
            Arc::new(FrameworkRegistry::with_builtins()),
            DetectionConfig::default(),
        )
    }

    /// Registry and settings from configuration. Fails on any malformed pack.
    pub fn from_config(config: &AgentScanConfig) -> Result<Self, ConfigurationError> {
        let registry = FrameworkRegistry::from_config(&config.registry)?;
        Ok(Self::new(Arc::new(registry), config.detection.clone()))
    }

    pub fn registry(&self) -> &FrameworkRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Analyze one file's text.
    pub fn scan_file(
        &self,
        file_path: &str,
        text: &str,
        language: Language,
    ) -> Result<FileFinding, ParseError> {
        let facts = self.parsers.extract(text, language).map_err(|e| {
            warn!(file = %file_path, language = %language, error = %e, "failed to parse file");
            e
        })?;

        let matcher = ConstructMatcher::new(&self.registry, self.config.effective_snippet_max_len());
        let matches = matcher.match_constructs(&facts, text);
        let imports = matcher.import_evidence(&facts);

        debug!(
            file = %file_path,
            language = %language,
            bindings = facts.imports.len(),
            call_sites = facts.call_sites.len(),
            matches = matches.len(),
            "scanned file"
        );

        Ok(FileFinding::new(
            file_path,
            language,
            matches,
            imports,
            self.config.effective_confidence_threshold(),
        ))
    }

    /// Like `scan_file`, with the language given as an id (`"python"`, `"ts"`, ...).
    pub fn scan_source(
        &self,
        file_path: &str,
        text: &str,
        language_id: &str,
    ) -> Result<FileFinding, ParseError> {
        let language: Language = language_id.parse()?;
        self.scan_file(file_path, text, language)
    }

    /// Like `scan_file`, with the language detected from the path's extension.
    pub fn scan_path(&self, path: &Path, text: &str) -> Result<FileFinding, ParseError> {
        let language = self
            .parsers
            .detect_language(path)
            .ok_or_else(|| ParseError::UnsupportedLanguage {
                language: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            })?;
        self.scan_file(&path.display().to_string(), text, language)
    }
}
