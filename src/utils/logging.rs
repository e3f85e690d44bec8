//! Structured logging setup on top of `tracing-subscriber`.

use crate::config::LoggingConfig;
use crate::error::{constants, ProtocolError, Result};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.log_level` when set. Fails if a
/// global subscriber is already installed, so only the first call in a
/// process (and only one of the plain or `json_format` branches) takes effect.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| {
        ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_LOGGING_INIT))
    })?;
    tracing::info!(app = %config.app_name, "Logging initialized");
    Ok(())
}
