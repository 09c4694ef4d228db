//! Language selection helpers. File-system traversal is left to callers.

pub mod language_detect;

pub use language_detect::Language;
