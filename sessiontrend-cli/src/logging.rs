//! Logging initialization.
//!
//! - `pretty`: colored, human-readable events
//! - `json`: one structured object per event, for log aggregation
//!
//! Both write to stderr; stdout is reserved for JSON results.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::{LogFormat, LoggingSettings};

/// Filter from `RUST_LOG` when set, else the configured level.
fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
}

pub fn init_logging(settings: &LoggingSettings) {
    let filter = env_filter(settings);

    match settings.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
