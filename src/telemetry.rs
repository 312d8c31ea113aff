//! Structured logging set-up for the command-line client.
//!
//! Library code emits `tracing` events; the binary installs a formatting
//! subscriber that writes them to stderr so stdout stays reserved for
//! rendered content.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::content::ContentError;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "BLOGLINE_LOG";

/// Directive applied when neither the environment nor the configuration
/// names one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Builds the log filter from the environment value and the configured
/// fallback, in that order of preference.
///
/// # Errors
///
/// Returns [`ContentError::Configuration`] when the chosen directive does
/// not parse.
pub fn build_filter(
    env_value: Option<&str>,
    configured: Option<&str>,
) -> Result<EnvFilter, ContentError> {
    let directive = env_value
        .filter(|value| !value.trim().is_empty())
        .or(configured)
        .unwrap_or(DEFAULT_LOG_FILTER);

    EnvFilter::try_new(directive).map_err(|error| ContentError::Configuration {
        message: format!("invalid log filter '{directive}': {error}"),
    })
}

/// Installs the global stderr subscriber.
///
/// Calling this more than once keeps the first subscriber.
///
/// # Errors
///
/// Returns [`ContentError::Configuration`] when the filter directive is
/// invalid.
pub fn init_logging(configured: Option<&str>) -> Result<(), ContentError> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(env_value.as_deref(), configured)?;

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
