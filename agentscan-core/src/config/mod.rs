//! Configuration consumed by the detection engine.

pub mod agentscan_config;
pub mod detection_config;
pub mod registry_config;

pub use agentscan_config::AgentScanConfig;
pub use detection_config::DetectionConfig;
pub use registry_config::RegistryConfig;
