//! Logging initialisation via tracing-subscriber.

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; `level` is the fallback.
pub fn init(level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| CliError::Logger(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Logger(format!("failed to set subscriber: {e}")))
}
