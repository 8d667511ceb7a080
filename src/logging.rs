//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The library only emits events; hosts decide whether to install a
//! subscriber. `RUST_LOG` takes precedence over the filter passed in.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive when neither `RUST_LOG` nor a filter is given.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global fmt subscriber.
///
/// Returns `false` when a global subscriber was already installed, which
/// leaves the existing one in place.
pub fn init_logging(filter: Option<&str>) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
