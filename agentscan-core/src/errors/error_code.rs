//! Stable, machine-readable error codes.

/// Implemented by every error enum so callers can report a stable code
/// alongside the human message.
pub trait AgentScanErrorCode {
    fn error_code(&self) -> &'static str;
}

// Configuration
pub const CONFIG_EMPTY_ID: &str = "CONFIG_EMPTY_ID";
pub const CONFIG_EMPTY_SIGNATURES: &str = "CONFIG_EMPTY_SIGNATURES";
pub const CONFIG_DUPLICATE_ID: &str = "CONFIG_DUPLICATE_ID";
pub const CONFIG_INVALID_SIGNATURE: &str = "CONFIG_INVALID_SIGNATURE";
pub const CONFIG_UNKNOWN_ROLE: &str = "CONFIG_UNKNOWN_ROLE";
pub const CONFIG_UNKNOWN_LANGUAGE: &str = "CONFIG_UNKNOWN_LANGUAGE";
pub const CONFIG_TOML: &str = "CONFIG_TOML";
pub const CONFIG_IO: &str = "CONFIG_IO";
pub const CONFIG_INVALID_VALUE: &str = "CONFIG_INVALID_VALUE";

// Parsing
pub const PARSE_UNSUPPORTED_LANGUAGE: &str = "PARSE_UNSUPPORTED_LANGUAGE";
pub const PARSE_GRAMMAR_LOAD: &str = "PARSE_GRAMMAR_LOAD";
pub const PARSE_NO_TREE: &str = "PARSE_NO_TREE";
pub const PARSE_MALFORMED_IMPORT: &str = "PARSE_MALFORMED_IMPORT";
pub const PARSE_INVALID_SOURCE: &str = "PARSE_INVALID_SOURCE";
