//! Logging initialization driven by accumulated `-v` occurrences.
//!
//! Structured logging via the `tracing` crate. The dispatcher calls
//! [`init`] exactly once per process after bootstrap; the mapping from
//! verbosity to level is exposed separately for tests and for applications
//! that install their own subscriber.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Map a `-v` count to a log level: 0 warn, 1 info, 2 debug, 3+ trace.
pub fn level_for(verbosity: u64) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber at the level mapped from `verbosity`.
/// An explicit `RUST_LOG` takes precedence over the mapped level. Repeated
/// calls are no-ops so embedding dispatch in tests stays safe.
pub fn init(verbosity: u64) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).to_string().to_lowercase()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
