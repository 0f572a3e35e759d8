//! Structured logging setup using the `tracing` crate.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the host. This helper wires a sensible default for binaries and
//! tests that want one.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable controlling the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "STRATUM_LOG";

/// Install a fmt subscriber filtered by `STRATUM_LOG` (default `info`).
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
