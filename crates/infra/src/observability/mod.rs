//! Structured logging setup
//!
//! Logs go to stderr so stdout stays free for command output. `RUST_LOG`, if
//! set, takes precedence over the configured level.

use sitecode_domain::{LoggingConfig, Result, SiteCodeError};
use tracing_subscriber::EnvFilter;

/// Build the filter for `config`, preferring `RUST_LOG` when present.
///
/// # Errors
/// Returns `SiteCodeError::Config` if the configured level is not a valid
/// filter directive.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| {
        SiteCodeError::Config(format!("Invalid log level '{}': {}", config.level, e))
    })
}

/// Install the global subscriber.
///
/// # Errors
/// Returns `SiteCodeError::Config` for an invalid level, or
/// `SiteCodeError::Internal` if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_target(false).try_init()
    };

    installed.map_err(|e| SiteCodeError::Internal(format!("Failed to install logger: {e}")))
}
