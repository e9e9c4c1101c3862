//! Tracing subscriber setup for the service binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builds the log filter: `RUST_LOG` if set, otherwise `default_filter`.
///
/// An unparsable directive falls back to `info`.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global `fmt` subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
