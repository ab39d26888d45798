//! # Retryable DNS
//!
//! Resolves hosts through a pool of resolvers and prints one JSON object per
//! host on stdout.

mod bootstrap;

use bootstrap::HostReport;
use clap::{Parser, ValueEnum};
use retryable_dns_domain::{CliOverrides, RecordType};
use retryable_dns_infrastructure::DnsClient;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// A record addresses and TTL
    Simple,
    /// Records of the requested type plus the response dump
    Raw,
    /// Single attempt, every answer record grouped by type
    Enrich,
}

#[derive(Parser)]
#[command(name = "retryable-dns")]
#[command(version)]
#[command(about = "DNS lookups retried across a pool of resolvers")]
struct Cli {
    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Resolver address (repeatable), e.g. 8.8.8.8 or 1.1.1.1:53
    #[arg(short = 'r', long = "resolver")]
    resolvers: Vec<String>,

    /// Maximum attempts per lookup
    #[arg(long)]
    retries: Option<usize>,

    /// Per-attempt timeout in milliseconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Record type for raw and enrich modes
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: RecordType,

    /// Lookup mode
    #[arg(short = 'm', long, value_enum, default_value = "simple")]
    mode: Mode,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Hosts to resolve
    #[arg(required = true)]
    hosts: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        resolvers: Some(cli.resolvers.clone()),
        max_retries: cli.retries,
        query_timeout: cli.timeout,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(&config, cli.config.as_deref());

    let client = Arc::new(DnsClient::from_config(&config.client)?);

    info!(
        hosts = cli.hosts.len(),
        mode = ?cli.mode,
        record_type = %cli.record_type,
        "Starting lookups"
    );

    let lookups: Vec<_> = cli
        .hosts
        .iter()
        .cloned()
        .map(|host| {
            let client = client.clone();
            let (mode, record_type) = (cli.mode, cli.record_type);
            let handle = tokio::spawn({
                let host = host.clone();
                async move { lookup(&client, host, mode, record_type).await }
            });
            (host, handle)
        })
        .collect();

    let mut failed = 0usize;
    for line in bootstrap::collect_lines(lookups).await {
        if !line.ok {
            failed += 1;
        }
        println!("{}", line.json);
    }

    if failed > 0 {
        error!(failed, total = cli.hosts.len(), "Some lookups failed");
        anyhow::bail!("{} of {} lookups failed", failed, cli.hosts.len());
    }

    Ok(())
}

async fn lookup(
    client: &DnsClient,
    host: String,
    mode: Mode,
    record_type: RecordType,
) -> serde_json::Result<(String, bool)> {
    match mode {
        Mode::Simple => {
            let result = client.resolve(&host).await;
            let report = HostReport::from_result(host, result);
            Ok((report.to_json()?, report.is_ok()))
        }
        Mode::Raw => {
            let resolution = client.resolve_raw(&host, record_type).await;
            let report = HostReport::from_resolution(host, resolution);
            Ok((report.to_json()?, report.is_ok()))
        }
        Mode::Enrich => {
            let resolution = client.resolve_enrich(&host, record_type).await;
            let report = HostReport::from_resolution(host, resolution);
            Ok((report.to_json()?, report.is_ok()))
        }
    }
}
