//! Tracing initialization.

use std::{io, sync::Once};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `CHIRANK_LOG=chirank_columnar=debug`.
pub const LOG_ENV: &str = "CHIRANK_LOG";

/// Installs a stderr subscriber filtered by [`LOG_ENV`], falling back to `info`.
///
/// Logs go to stderr so that `--output -` keeps stdout clean for results.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
