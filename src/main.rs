//! Blogline CLI entrypoint for browsing blog content.

use std::io::{self, Write};
use std::process::ExitCode;

use blogline::{BloglineConfig, ContentError, HttpContentGateway, OperationMode, telemetry};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ContentError> {
    let config = load_config()?;
    telemetry::init_logging(config.log_filter.as_deref())?;
    config.validate()?;

    let gateway =
        HttpContentGateway::for_base_url(config.resolve_api_base(), &config.gateway_options())?;
    tracing::debug!(base = %gateway.base_url(), mode = ?config.operation_mode(), "starting");

    match config.operation_mode() {
        OperationMode::Listing => cli::listing::run(&config, &gateway).await,
        OperationMode::Article => cli::article::run(&config, &gateway).await,
        OperationMode::Categories => cli::categories::run(&gateway).await,
        OperationMode::ContentTypes => cli::content_types::run(&gateway).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ContentError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<BloglineConfig, ContentError> {
    BloglineConfig::load().map_err(|error| ContentError::Configuration {
        message: error.to_string(),
    })
}
