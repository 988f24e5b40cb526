//! Logging setup.

use crate::cli::TracingFormat;
use crate::config::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Configure and initialize logging for the application.
///
/// `RUST_LOG` wins when set; otherwise other crates log at `warn` and this
/// crate at the configured base level.
pub fn setup_logging(config: &Config, format: TracingFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let base_level = &config.log_level;
        EnvFilter::new(format!("warn,scarlet={base_level}"))
    });

    match format {
        TracingFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(true))
                .init();
        }
        TracingFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(true).json())
                .init();
        }
    }
}
