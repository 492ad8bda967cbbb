//! Tracing subscriber setup for hosts embedding the storefront.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "phytomed_storefront=info";

/// Initialize tracing with an `EnvFilter` and a formatting layer.
///
/// Honours `RUST_LOG`, falling back to `default_filter` (or
/// [`DEFAULT_FILTER`]). Returns `false` if a global subscriber was already
/// installed, which makes repeated calls harmless.
pub fn init_tracing(default_filter: Option<&str>) -> bool {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.unwrap_or(DEFAULT_FILTER).into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Initialize tracing with JSON output, for hosts that ship logs elsewhere.
pub fn init_json_tracing(default_filter: Option<&str>) -> bool {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.unwrap_or(DEFAULT_FILTER).into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .is_ok()
}
