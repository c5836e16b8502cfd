//! Diagnostics for the demo itself, kept apart from the timing log.
//!
//! The timing library reports sink trouble (a log file that cannot be
//! opened, a failed flush) through `tracing`; this installs a subscriber so
//! those events show up on stderr. `RUST_LOG` overrides the default level.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the stderr subscriber.
///
/// `verbose` lowers the default level from WARN to DEBUG, which also shows
/// when the log file is opened and closed.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
