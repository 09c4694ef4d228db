//! Serde schema for framework packs.
//!
//! One pack (TOML document) describes one framework: how it is imported and
//! which of its symbols are agent constructs. Packs are validated and compiled
//! by the registry in `agentscan-analysis`.

use serde::{Deserialize, Serialize};

/// Top-level framework pack definition (one per TOML file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FrameworkSpec {
    /// Framework metadata.
    pub framework: FrameworkMeta,
    /// Import signatures identifying the framework.
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
    /// Construct signatures (agent, crew, task, ...).
    #[serde(default)]
    pub constructs: Vec<ConstructSpec>,
}

/// Framework metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FrameworkMeta {
    /// Unique framework identifier (e.g., "langchain", "crewai").
    pub id: String,
    /// Display name for reports.
    pub name: Option<String>,
    /// Languages this framework targets. Empty means every supported language.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Pack version string (e.g., "1.0.0").
    pub version: Option<String>,
}

/// A module path pattern, optionally narrowed to one imported symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ImportSpec {
    /// Module path prefix. Matches the path itself and any `.` or `/` sub-path.
    pub module: String,
    /// Specific symbol, or `"*"` / absent for any symbol.
    pub symbol: Option<String>,
}

/// A framework symbol that represents a first-class agent concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ConstructSpec {
    /// Symbol name. May contain `*` wildcards (e.g., `"*Tool"`).
    pub symbol: String,
    /// Role tag: agent, crew, task, executor, tool, workflow.
    pub role: String,
}

impl FrameworkSpec {
    /// Parse a single pack from TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Generate a JSON Schema for the `FrameworkSpec` type.
///
/// Pack authors can use it to validate their TOML files.
pub fn generate_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(FrameworkSpec)
}
