//! Detection engine: import table, construct matcher, and the per-file detector.

pub mod detector;
pub mod import_table;
pub mod matcher;
pub mod types;

pub use detector::Detector;
pub use import_table::ImportTable;
pub use matcher::ConstructMatcher;
pub use types::{AmbiguousMatchWarning, ImportEvidence, Match, ResolvedTarget};
