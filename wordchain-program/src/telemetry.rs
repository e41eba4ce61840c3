//! Tracing subscriber setup for embedders and tests.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,wordchain_program=debug";

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns an error if a global subscriber is already installed, so tests can
/// call it repeatedly and ignore the result.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
