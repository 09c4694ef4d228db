//! Error types for the agentscan engine.
//!
//! `ConfigurationError` is raised eagerly while building the registry or
//! loading configuration. `ParseError` is per-file and returned as a value.

pub mod config_error;
pub mod error_code;
pub mod parse_error;

pub use config_error::ConfigurationError;
pub use parse_error::ParseError;
