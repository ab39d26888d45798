use retryable_dns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Summary of the effective configuration; call once logging is up.
pub fn log_config(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        resolvers = config.client.resolvers.len(),
        max_retries = config.client.max_retries,
        query_timeout_ms = config.client.query_timeout,
        tcp_fallback = config.client.tcp_fallback,
        "Configuration loaded"
    );
}
