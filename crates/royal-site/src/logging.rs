//! Native log output for examples, tests and tooling.
//!
//! Browser builds install no subscriber; the component `tracing` events are
//! simply dropped there and mount failures go to the devtools console.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, or by `default_filter`
/// when the variable is unset or invalid.
///
/// Returns `false` when a global subscriber was already installed, so
/// calling this more than once is harmless.
pub fn init_logging(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
