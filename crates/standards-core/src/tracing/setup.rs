//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging system.
///
/// Reads the `STANDARDS_LOG` environment variable for per-module log levels.
/// Format: `STANDARDS_LOG=standards_analysis::extraction=debug,standards_cli=info`
///
/// Falls back to `standards=info` (`standards=debug` when `verbose`) if
/// `STANDARDS_LOG` is not set or is invalid. Output goes to stderr so
/// stdout stays machine-readable.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose {
            "standards=debug"
        } else {
            "standards=info"
        };
        let filter = EnvFilter::try_from_env("STANDARDS_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose),
            )
            .with(filter)
            .try_init();
    });
}
