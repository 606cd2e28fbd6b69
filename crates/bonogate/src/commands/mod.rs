//! Command dispatch: bridges CLI args -> portal client -> output rendering.

pub mod login;
pub mod status;
pub mod validate;

use std::time::Duration;

use bonogate_api::{PortalClient, TransportConfig};
use bonogate_config::GatewayConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command, returning the process exit code.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<i32, CliError> {
    match cmd {
        Command::Validate(args) => validate::handle(args, global).await,
        Command::Login => login::handle(global).await,
        Command::Status => status::handle(global),
    }
}

/// Load configuration and apply CLI flag overrides (flag > env > file).
pub(crate) fn load_config(global: &GlobalOpts) -> Result<GatewayConfig, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(bonogate_config::config_path);
    let mut config = bonogate_config::load_from(&path)?;

    if let Some(ref portal) = global.portal {
        config.portal_url = portal.parse().map_err(|_| CliError::Config {
            message: format!("invalid portal URL: {portal}"),
        })?;
    }
    if let Some(ref validator) = global.validator {
        config.validator = validator.clone();
    }
    if let Some(timeout) = global.timeout {
        config.timeout = Duration::from_secs(timeout);
    }

    Ok(config)
}

/// Build a `PortalClient` from resolved configuration.
pub(crate) fn build_client(config: GatewayConfig) -> Result<PortalClient, CliError> {
    let transport = TransportConfig {
        timeout: config.timeout,
        ..TransportConfig::default()
    };

    let client = PortalClient::new(
        config.portal_url,
        config.validator,
        config.credentials,
        &transport,
    )?
    .with_session_ttl(config.session_ttl);

    Ok(client)
}
