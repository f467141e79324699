//! Logging bootstrap.
//!
//! `RUST_LOG` takes precedence over the configured filter. Output goes to
//! stderr so exported data on stdout stays clean.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error returned when a global subscriber is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global tracing subscriber.
pub fn init(config: &LoggingConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
