//! Top-level configuration: `agentscan.toml` plus environment overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::detection_config::DetectionConfig;
use super::registry_config::RegistryConfig;
use crate::errors::ConfigurationError;
use crate::types::confidence::Confidence;

/// File name looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "agentscan.toml";

pub const ENV_CONFIDENCE_THRESHOLD: &str = "AGENTSCAN_CONFIDENCE_THRESHOLD";
pub const ENV_SNIPPET_MAX_LEN: &str = "AGENTSCAN_SNIPPET_MAX_LEN";
pub const ENV_DISABLED_FRAMEWORKS: &str = "AGENTSCAN_DISABLED_FRAMEWORKS";

/// Complete engine configuration. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentScanConfig {
    pub detection: DetectionConfig,
    pub registry: RegistryConfig,
}

impl AgentScanConfig {
    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(toml_str).map_err(|e| ConfigurationError::Toml {
            source_name: CONFIG_FILE_NAME.to_string(),
            message: e.message().to_string(),
        })
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigurationError> {
        toml::to_string_pretty(self).map_err(|e| ConfigurationError::Toml {
            source_name: CONFIG_FILE_NAME.to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration for a project.
    ///
    /// Reads `explicit_path` if given, else `<root>/agentscan.toml` if it
    /// exists, else defaults. Environment overrides are applied last.
    /// A relative `custom_packs_dir` is resolved against `root`.
    pub fn load(root: &Path, explicit_path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let candidate = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = root.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        let mut config = match candidate {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                let content =
                    std::fs::read_to_string(&path).map_err(|e| ConfigurationError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?;
                toml::from_str::<Self>(&content).map_err(|e| ConfigurationError::Toml {
                    source_name: path.display().to_string(),
                    message: e.message().to_string(),
                })?
            }
            None => Self::default(),
        };

        let resolved_packs_dir = config
            .registry
            .custom_packs_dir
            .as_deref()
            .map(Path::new)
            .filter(|dir| dir.is_relative())
            .map(|dir| root.join(dir).display().to_string());
        if resolved_packs_dir.is_some() {
            config.registry.custom_packs_dir = resolved_packs_dir;
        }

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `AGENTSCAN_*` environment variables on top of the current values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigurationError> {
        if let Ok(value) = std::env::var(ENV_CONFIDENCE_THRESHOLD) {
            let threshold: Confidence =
                value
                    .parse()
                    .map_err(|_| ConfigurationError::InvalidValue {
                        key: ENV_CONFIDENCE_THRESHOLD.to_string(),
                        value: value.clone(),
                    })?;
            self.detection.confidence_threshold = Some(threshold);
        }

        if let Ok(value) = std::env::var(ENV_SNIPPET_MAX_LEN) {
            let len = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|len| *len > 0)
                .ok_or_else(|| ConfigurationError::InvalidValue {
                    key: ENV_SNIPPET_MAX_LEN.to_string(),
                    value: value.clone(),
                })?;
            self.detection.snippet_max_len = Some(len);
        }

        if let Ok(value) = std::env::var(ENV_DISABLED_FRAMEWORKS) {
            for id in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !self.registry.disabled.iter().any(|d| d == id) {
                    self.registry.disabled.push(id.to_string());
                }
            }
        }

        Ok(())
    }
}
