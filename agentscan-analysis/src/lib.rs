//! # agentscan-analysis
//!
//! Detection engine for AI-agent frameworks: given a file's text and language,
//! report which frameworks it imports, which of their constructs (agents,
//! crews, tasks, executors, tools, workflows) it instantiates, and where.
//!
//! Pipeline: parsers (import bindings + call sites), then the engine (import
//! table, construct matcher), then aggregation (`FileFinding`, `ProjectFinding`).

#![allow(clippy::module_inception)]

pub mod aggregation;
pub mod engine;
pub mod frameworks;
pub mod parsers;
pub mod scanner;

use std::sync::OnceLock;

use agentscan_core::errors::ParseError;

pub use aggregation::{merge_failure, merge_findings, FileFinding, ProjectFinding};
pub use engine::{Detector, Match};
pub use frameworks::FrameworkRegistry;
pub use scanner::Language;

/// Analyze one file with the built-in registry and default settings.
pub fn scan_file(
    file_path: &str,
    text: &str,
    language: Language,
) -> Result<FileFinding, ParseError> {
    static DEFAULT_DETECTOR: OnceLock<Detector> = OnceLock::new();
    DEFAULT_DETECTOR
        .get_or_init(Detector::with_builtins)
        .scan_file(file_path, text, language)
}
