//! Project-level aggregate.
//!
//! Merging uses ordered maps and sets, additive counters, and `max` for
//! confidence, so the result does not depend on the order files complete in.

use std::collections::{BTreeMap, BTreeSet};

use agentscan_core::errors::ParseError;
use agentscan_core::{AgentScanErrorCode, Confidence, ConstructRole};
use serde::Serialize;

use super::file_finding::FileFinding;

/// Per-framework totals across the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameworkSummary {
    /// File path → strongest confidence seen in that file.
    pub files: BTreeMap<String, Confidence>,
    pub match_count: usize,
    pub roles: BTreeMap<ConstructRole, usize>,
}

impl FrameworkSummary {
    /// Strongest confidence over all files.
    pub fn confidence(&self) -> Confidence {
        self.files.values().copied().max().unwrap_or_default()
    }

    fn combine(&mut self, other: &FrameworkSummary) {
        for (path, confidence) in &other.files {
            let entry = self.files.entry(path.clone()).or_insert(*confidence);
            *entry = (*entry).max(*confidence);
        }
        self.match_count += other.match_count;
        for (role, count) in &other.roles {
            *self.roles.entry(*role).or_insert(0) += count;
        }
    }
}

/// A file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FileFailure {
    pub file_path: String,
    pub code: String,
    pub message: String,
}

/// Aggregate over every file contributed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectFinding {
    frameworks: BTreeMap<String, FrameworkSummary>,
    files_scanned: usize,
    files_with_detections: usize,
    total_matches: usize,
    failures: BTreeSet<FileFailure>,
}

impl ProjectFinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frameworks(&self) -> &BTreeMap<String, FrameworkSummary> {
        &self.frameworks
    }

    pub fn framework(&self, id: &str) -> Option<&FrameworkSummary> {
        self.frameworks.get(id)
    }

    /// Files successfully analyzed.
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn files_with_detections(&self) -> usize {
        self.files_with_detections
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    pub fn failures(&self) -> &BTreeSet<FileFailure> {
        &self.failures
    }

    /// Add one file's finding. Pure: `self` is not modified.
    pub fn with_file(&self, finding: &FileFinding) -> Self {
        let mut merged = self.clone();
        merged.combine_in_place(&Self::from_file(finding));
        merged
    }

    /// Record a file that failed to parse. Pure.
    pub fn with_failure(&self, file_path: &str, error: &ParseError) -> Self {
        let mut merged = self.clone();
        merged.failures.insert(FileFailure {
            file_path: file_path.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        });
        merged
    }

    /// Merge two partial aggregates (e.g. from parallel workers).
    pub fn combine(&self, other: &ProjectFinding) -> Self {
        let mut merged = self.clone();
        merged.combine_in_place(other);
        merged
    }

    /// Aggregate of a single file.
    pub fn from_file(finding: &FileFinding) -> Self {
        let mut frameworks: BTreeMap<String, FrameworkSummary> = BTreeMap::new();
        for (id, confidence) in finding.detections() {
            let summary = frameworks.entry(id.clone()).or_default();
            summary.files.insert(finding.file_path().to_string(), confidence);
            for m in finding.matches_for(&id) {
                summary.match_count += 1;
                *summary.roles.entry(m.role).or_insert(0) += 1;
            }
        }
        Self {
            frameworks,
            files_scanned: 1,
            files_with_detections: usize::from(finding.has_detections()),
            total_matches: finding.matches().len(),
            failures: BTreeSet::new(),
        }
    }

    fn combine_in_place(&mut self, other: &ProjectFinding) {
        for (id, summary) in &other.frameworks {
            self.frameworks
                .entry(id.clone())
                .or_default()
                .combine(summary);
        }
        self.files_scanned += other.files_scanned;
        self.files_with_detections += other.files_with_detections;
        self.total_matches += other.total_matches;
        self.failures.extend(other.failures.iter().cloned());
    }
}
