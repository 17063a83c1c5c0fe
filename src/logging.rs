//! Logging initialization for the CLI
//!
//! Logs go to stderr; stdout is reserved for the decision report.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target of every event emitted by this crate
pub const CRATE_TARGET: &str = "payment_action_engine";

/// Build the filter used by [`init_logging`]
///
/// `verbose` forces debug for this crate. Otherwise `RUST_LOG` is honoured,
/// falling back to warnings only, so rejections and malformed lines are
/// still visible.
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(format!("{}=debug,info", CRATE_TARGET))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn,error", CRATE_TARGET)))
    }
}

/// Install the global tracing subscriber
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(log_filter(verbose))
        .try_init();
}
