//! Per-file detection result.

use std::collections::{BTreeMap, BTreeSet};

use agentscan_core::Confidence;
use serde::Serialize;

use crate::engine::types::{ImportEvidence, Match};
use crate::scanner::language_detect::Language;

/// Detection result for one file.
///
/// `frameworks_detected` is derived from `matches` at construction and cannot
/// be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFinding {
    file_path: String,
    language: Language,
    matches: Vec<Match>,
    imports: Vec<ImportEvidence>,
    frameworks_detected: BTreeSet<String>,
}

impl FileFinding {
    /// Sort matches by (line, column, framework), drop exact duplicates
    /// (same framework, role, and line), and derive the detected set.
    ///
    /// With a `High` threshold, import evidence for frameworks without a
    /// construct match is dropped.
    pub fn new(
        file_path: impl Into<String>,
        language: Language,
        mut matches: Vec<Match>,
        mut imports: Vec<ImportEvidence>,
        threshold: Confidence,
    ) -> Self {
        matches.sort_by(|a, b| {
            (a.line, a.column, &a.framework_id).cmp(&(b.line, b.column, &b.framework_id))
        });
        let mut seen = BTreeSet::new();
        matches.retain(|m| seen.insert((m.framework_id.clone(), m.role, m.line)));

        let frameworks_detected: BTreeSet<String> =
            matches.iter().map(|m| m.framework_id.clone()).collect();

        if !Confidence::Low.meets(threshold) {
            imports.retain(|e| frameworks_detected.contains(&e.framework_id));
        }
        imports.sort_by(|a, b| (a.line, &a.framework_id).cmp(&(b.line, &b.framework_id)));
        imports.dedup();

        Self {
            file_path: file_path.into(),
            language,
            matches,
            imports,
            frameworks_detected,
        }
    }

    /// A file with nothing detected.
    pub fn empty(file_path: impl Into<String>, language: Language) -> Self {
        Self::new(file_path, language, Vec::new(), Vec::new(), Confidence::Low)
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Ordered by (line, column, framework id).
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn imports(&self) -> &[ImportEvidence] {
        &self.imports
    }

    /// Frameworks with at least one construct match.
    pub fn frameworks_detected(&self) -> &BTreeSet<String> {
        &self.frameworks_detected
    }

    /// `High` if the framework has a construct match, `Low` if it was only
    /// imported, `None` otherwise.
    pub fn confidence(&self, framework_id: &str) -> Option<Confidence> {
        if self.frameworks_detected.contains(framework_id) {
            Some(Confidence::High)
        } else if self.imports.iter().any(|e| e.framework_id == framework_id) {
            Some(Confidence::Low)
        } else {
            None
        }
    }

    /// Every reported framework with its confidence.
    pub fn detections(&self) -> BTreeMap<String, Confidence> {
        let mut detections: BTreeMap<String, Confidence> = self
            .imports
            .iter()
            .map(|e| (e.framework_id.clone(), Confidence::Low))
            .collect();
        for id in &self.frameworks_detected {
            detections.insert(id.clone(), Confidence::High);
        }
        detections
    }

    pub fn has_detections(&self) -> bool {
        !self.frameworks_detected.is_empty() || !self.imports.is_empty()
    }

    /// Matches attributed to one framework.
    pub fn matches_for<'a>(&'a self, framework_id: &'a str) -> impl Iterator<Item = &'a Match> + 'a {
        self.matches
            .iter()
            .filter(move |m| m.framework_id == framework_id)
    }
}
