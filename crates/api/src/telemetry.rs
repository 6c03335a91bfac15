//! Tracing initialization for binaries and test harnesses.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info` for this workspace's
/// crates. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,copperleaf_api=debug"));

    // try_init so embedding applications and tests that already installed a
    // subscriber keep theirs
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
