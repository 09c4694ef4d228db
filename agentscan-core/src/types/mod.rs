//! Shared types used across the workspace.

pub mod collections;
pub mod confidence;
pub mod framework_spec;
pub mod role;
