//! Diagnostic logging for the actionlog binary itself.
//!
//! Diagnostics go to stderr so stdout stays clean for rendered log lines.
//! `RUST_LOG` controls verbosity (default `warn`).

use std::io;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Installs the global diagnostic subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .init();
    });
}
