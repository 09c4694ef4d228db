//! Framework Registry: TOML-driven, user-extensible catalog of agent frameworks.
//!
//! Architecture:
//! - `descriptor.rs`: compiled FrameworkDescriptor / ImportSignature / ConstructSignature
//! - `loader.rs`: FrameworkSpec validation → FrameworkDescriptor (globs pre-compiled)
//! - `registry.rs`: built-in packs + inline overrides + custom pack directory
//! - `diagnostics.rs`: load-time counters
//!
//! Adding a framework is a data change: drop a pack into `packs/` (built-in)
//! or into the configured custom packs directory.

pub mod descriptor;
pub mod diagnostics;
pub mod loader;
pub mod registry;

pub use agentscan_core::types::framework_spec::generate_json_schema;
pub use descriptor::{ConstructSignature, FrameworkDescriptor, ImportSignature, SymbolPattern};
pub use diagnostics::RegistryDiagnostics;
pub use registry::FrameworkRegistry;
