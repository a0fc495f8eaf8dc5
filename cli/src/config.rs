//! Resolving the effective client configuration.

use anyhow::Context;
use collabsplit_gateway::ClientConfig;

use crate::args::Cli;

/// File settings (or defaults) overlaid with any flags and env vars given.
pub fn resolve(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let base = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    Ok(overlay(base, cli))
}

fn overlay(base: ClientConfig, cli: &Cli) -> ClientConfig {
    ClientConfig {
        rpc_url: cli.rpc_url.clone().unwrap_or(base.rpc_url),
        package_id: cli.package_id.clone().unwrap_or(base.package_id),
        gas_budget: cli.gas_budget.or(base.gas_budget),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
        log_format: cli.log_format.clone().unwrap_or(base.log_format),
        ..base
    }
}
