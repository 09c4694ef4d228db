//! Framework pack loader: validates a `FrameworkSpec` and compiles it into a
//! `FrameworkDescriptor` (globs pre-compiled to regexes).

use std::path::Path;

use agentscan_core::errors::ConfigurationError;
use agentscan_core::types::framework_spec::FrameworkSpec;
use agentscan_core::ConstructRole;
use regex::Regex;

use super::descriptor::{ConstructSignature, FrameworkDescriptor, ImportSignature, SymbolPattern};
use crate::scanner::language_detect::Language;

/// Parse and compile a pack from a TOML string.
pub fn load_from_str(
    toml_str: &str,
    source_name: &str,
) -> Result<FrameworkDescriptor, ConfigurationError> {
    let spec = FrameworkSpec::from_toml(toml_str).map_err(|e| ConfigurationError::Toml {
        source_name: source_name.to_string(),
        message: e.message().to_string(),
    })?;
    compile(&spec)
}

/// Parse and compile a pack from a TOML file.
pub fn load_from_file(path: &Path) -> Result<FrameworkDescriptor, ConfigurationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_from_str(&content, &path.display().to_string())
}

/// Validate and compile a pack.
pub fn compile(spec: &FrameworkSpec) -> Result<FrameworkDescriptor, ConfigurationError> {
    let id = spec.framework.id.trim();
    if id.is_empty() {
        return Err(ConfigurationError::EmptyId);
    }
    if spec.imports.is_empty() {
        return Err(ConfigurationError::EmptySignatures {
            id: id.to_string(),
            kind: "import",
        });
    }
    if spec.constructs.is_empty() {
        return Err(ConfigurationError::EmptySignatures {
            id: id.to_string(),
            kind: "construct",
        });
    }

    let languages = spec
        .framework
        .languages
        .iter()
        .map(|lang| {
            lang.parse::<Language>()
                .map_err(|_| ConfigurationError::UnknownLanguage {
                    id: id.to_string(),
                    language: lang.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let import_signatures = spec
        .imports
        .iter()
        .map(|imp| {
            let module = imp.module.trim();
            if module.is_empty() || module.contains(char::is_whitespace) {
                return Err(ConfigurationError::InvalidSignature {
                    id: id.to_string(),
                    signature: imp.module.clone(),
                    reason: "module pattern must be a non-empty path".to_string(),
                });
            }
            let symbol = imp
                .symbol
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty() && *s != "*")
                .map(str::to_string);
            Ok(ImportSignature {
                module: module.to_string(),
                symbol,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let construct_signatures = spec
        .constructs
        .iter()
        .map(|c| {
            let role = ConstructRole::parse_str(c.role.trim()).ok_or_else(|| {
                ConfigurationError::UnknownRole {
                    id: id.to_string(),
                    role: c.role.clone(),
                }
            })?;
            Ok(ConstructSignature {
                symbol: compile_symbol(id, &c.symbol)?,
                role,
            })
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;

    Ok(FrameworkDescriptor {
        id: id.to_string(),
        name: spec
            .framework
            .name
            .clone()
            .unwrap_or_else(|| id.to_string()),
        languages,
        version: spec.framework.version.clone(),
        import_signatures,
        construct_signatures,
    })
}

fn compile_symbol(id: &str, symbol: &str) -> Result<SymbolPattern, ConfigurationError> {
    let invalid = |reason: &str| ConfigurationError::InvalidSignature {
        id: id.to_string(),
        signature: symbol.to_string(),
        reason: reason.to_string(),
    };

    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(invalid("construct symbol is empty"));
    }
    if !symbol
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '*')
    {
        return Err(invalid("construct symbol must be an identifier or `*` glob"));
    }
    if !symbol.contains('*') {
        return Ok(SymbolPattern::Exact(symbol.to_string()));
    }
    if symbol.chars().all(|c| c == '*') {
        return Err(invalid("glob must contain at least one literal character"));
    }

    let body = symbol
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    let regex = Regex::new(&format!("^{body}$")).map_err(|e| invalid(&e.to_string()))?;
    Ok(SymbolPattern::Glob {
        pattern: symbol.to_string(),
        regex,
    })
}
