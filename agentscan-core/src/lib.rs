//! # agentscan-core
//!
//! Foundation crate for the agentscan detection engine.
//! Defines the error taxonomy, configuration, shared types, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::AgentScanConfig;
pub use errors::error_code::AgentScanErrorCode;
pub use errors::{ConfigurationError, ParseError};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::confidence::Confidence;
pub use types::role::ConstructRole;
