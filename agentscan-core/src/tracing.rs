//! Tracing subscriber setup.
//!
//! The engine only emits `tracing` events; embedding binaries decide whether
//! to install a subscriber. `init_tracing` is a convenience for the common case.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the filter directives (`RUST_LOG` syntax).
pub const LOG_ENV_VAR: &str = "AGENTSCAN_LOG";

/// Install a `fmt` subscriber filtered by `AGENTSCAN_LOG`, falling back to
/// `default_filter` (e.g. `"agentscan_analysis=info"`).
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
