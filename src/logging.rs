//! Tracing subscriber setup for the server binary.

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` directives are honoured; `verbose` raises the default level
/// from `info` to `debug`. Calling this twice is a no-op.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
