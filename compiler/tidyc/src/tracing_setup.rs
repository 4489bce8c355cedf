use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding gotidy's log filter.
pub const LOG_ENV: &str = "GOTIDY_LOG";

/// Initialize tracing for debug output on stderr.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `GOTIDY_LOG=debug`, or `RUST_LOG=tidy_fmt=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if a filter is set
        let filter = if let Ok(directives) = std::env::var(LOG_ENV) {
            EnvFilter::new(directives)
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
