//! Log output for the runtime
//!
//! The runtime emits `tracing` events (configuration load, errors reported
//! through the C ABI). Nothing is printed until a subscriber is installed,
//! either by the embedding program or by [`init`] / `pyc_runtime_init`.

use crate::config::{DEFAULT_LOG_FILTER, runtime_config};
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber filtered by `PYC_LOG`
///
/// Returns false if a global subscriber was already installed; calling this
/// more than once is harmless.
pub fn init() -> bool {
    let config = runtime_config();
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = %config.log_filter, "runtime logging initialized");
    }
    installed
}

/// Load configuration and set up logging
///
/// Generated programs call this once at the top of `main`. Optional: every
/// other export works without it, with logging disabled.
#[unsafe(no_mangle)]
pub extern "C" fn pyc_runtime_init() {
    init();
}
