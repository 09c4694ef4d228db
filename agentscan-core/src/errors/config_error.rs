//! Registry and configuration errors.

use super::error_code::{self, AgentScanErrorCode};

/// A malformed framework pack or configuration value.
///
/// Always fatal to registry/config construction: nothing is skipped silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Framework pack has an empty id")]
    EmptyId,

    #[error("Framework '{id}' declares no {kind} signatures")]
    EmptySignatures { id: String, kind: &'static str },

    #[error("Framework id '{id}' is registered more than once")]
    DuplicateId { id: String },

    #[error("Framework '{id}' has an invalid signature '{signature}': {reason}")]
    InvalidSignature {
        id: String,
        signature: String,
        reason: String,
    },

    #[error("Framework '{id}' uses unknown construct role '{role}'")]
    UnknownRole { id: String, role: String },

    #[error("Framework '{id}' targets unknown language '{language}'")]
    UnknownLanguage { id: String, language: String },

    #[error("Invalid TOML in {source_name}: {message}")]
    Toml { source_name: String, message: String },

    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

impl AgentScanErrorCode for ConfigurationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyId => error_code::CONFIG_EMPTY_ID,
            Self::EmptySignatures { .. } => error_code::CONFIG_EMPTY_SIGNATURES,
            Self::DuplicateId { .. } => error_code::CONFIG_DUPLICATE_ID,
            Self::InvalidSignature { .. } => error_code::CONFIG_INVALID_SIGNATURE,
            Self::UnknownRole { .. } => error_code::CONFIG_UNKNOWN_ROLE,
            Self::UnknownLanguage { .. } => error_code::CONFIG_UNKNOWN_LANGUAGE,
            Self::Toml { .. } => error_code::CONFIG_TOML,
            Self::Io { .. } => error_code::CONFIG_IO,
            Self::InvalidValue { .. } => error_code::CONFIG_INVALID_VALUE,
        }
    }
}
