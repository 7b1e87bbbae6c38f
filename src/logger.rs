//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::types::errors::ConfigError;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; `level` is the fallback.
pub fn init(level: &str) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ConfigError::Logger(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ConfigError::Logger(format!("failed to set subscriber: {e}")))
}
