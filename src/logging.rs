//! Diagnostics go to stderr so stdout carries nothing but the payload line

use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `LIMITSBAR_LOG=debug`
pub const LOG_ENV: &str = "LIMITSBAR_LOG";

const DEFAULT_FILTER: &str = "off";

/// Install the stderr subscriber; `log` records are bridged into it
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (tests, embedding) keeps the existing subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
