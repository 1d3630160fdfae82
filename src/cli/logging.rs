//! Diagnostic logging on stderr
//!
//! Reads `RUST_LOG`. Defaults to `warn`, or `debug` for this crate with `-v`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber
pub fn init(verbose: bool) {
    let fallback = if verbose { "warn,git_bucket=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
