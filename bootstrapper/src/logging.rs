//! Diagnostic tracing for the bootstrapper.
//!
//! Two streams reach the operator. The ` * ...` progress lines printed by the
//! stages go to stdout every run, whatever `RUST_LOG` says. Everything emitted
//! through `tracing` (spans per stage, spawned commands, mode changes) goes to
//! stderr and is filtered by `RUST_LOG`, so a plain run shows only warnings.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber: compact lines on stderr.
///
/// ```bash
/// RUST_LOG=bootstrapper=debug bootstrapper --auto
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
