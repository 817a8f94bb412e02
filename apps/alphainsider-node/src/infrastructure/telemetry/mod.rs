//! Logging Initialisation
//!
//! Installs a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`.
//! Stdout stays free for the JSON the host binary prints.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `alphainsider_node=info`)

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Directive applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "alphainsider_node=info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVE`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initialise the global subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}
