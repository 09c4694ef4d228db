//! Detection aggregator: file findings and the project aggregate.

pub mod file_finding;
pub mod project_finding;

pub use file_finding::FileFinding;
pub use project_finding::{FileFailure, FrameworkSummary, ProjectFinding};

use agentscan_core::errors::ParseError;
use agentscan_core::Confidence;

use crate::engine::types::{ImportEvidence, Match};
use crate::scanner::language_detect::Language;

/// Build a file finding from raw matches and import evidence.
pub fn aggregate_file(
    file_path: impl Into<String>,
    language: Language,
    matches: Vec<Match>,
    imports: Vec<ImportEvidence>,
    threshold: Confidence,
) -> FileFinding {
    FileFinding::new(file_path, language, matches, imports, threshold)
}

/// Fold a file finding into a project aggregate. Commutative and associative.
pub fn merge_findings(existing: &ProjectFinding, incoming: &FileFinding) -> ProjectFinding {
    existing.with_file(incoming)
}

/// Record a file-level parse failure in a project aggregate.
pub fn merge_failure(existing: &ProjectFinding, file_path: &str, error: &ParseError) -> ProjectFinding {
    existing.with_failure(file_path, error)
}
