//! cps-cron: advances CPS periods and announces period statistics.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use cps_chain::{ChainClient, IconRpcClient};
use cps_cron::{
    run_every, CronConfig, CronContext, Network, RunReport, RunSettings, ShutdownController,
};
use cps_notify::{HttpWebhook, IpfsClient};
use cps_types::{Address, SystemClock};
use cps_utils::{format_duration, init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "cps-cron", about = "CPS period transitions and webhook statistics")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "CPS_CONFIG")]
    config: Option<PathBuf>,

    /// Network: "mainnet", "lisbon", or "dev".
    #[arg(long, env = "CPS_NETWORK")]
    network: Option<String>,

    /// JSON-RPC endpoint (defaults to the network's public node).
    #[arg(long, env = "CPS_RPC_URL")]
    rpc_url: Option<String>,

    /// CPS governance contract address.
    #[arg(long, env = "CPS_SCORE")]
    cps_score: Option<String>,

    /// Relay that signs and submits `update_period`.
    #[arg(long, env = "CPS_SIGNER_URL")]
    signer_url: Option<String>,

    #[arg(long, env = "CPS_IPFS_BASE_URL")]
    ipfs_base_url: Option<String>,

    /// Webhook endpoints (comma-separated).
    #[arg(
        long = "webhook",
        env = "CPS_WEBHOOK_ENDPOINTS",
        value_delimiter = ','
    )]
    webhook_endpoints: Vec<String>,

    #[arg(long, env = "CPS_SETTLE_DELAY_MS")]
    settle_delay_ms: Option<u64>,

    #[arg(long, env = "CPS_MAX_TRANSITION_ATTEMPTS")]
    max_transition_attempts: Option<u32>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CPS_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CPS_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the job once.
    Run,
    /// Run the job on a fixed interval until SIGINT/SIGTERM.
    Watch {
        #[arg(long, default_value_t = 3600, env = "CPS_INTERVAL_SECS")]
        interval_secs: u64,
    },
    /// Print the current period.
    Period,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<CronConfig> {
        let mut config = match &self.config {
            Some(path) => CronConfig::from_toml_file(path)?,
            None => CronConfig::default(),
        };

        if let Some(network) = &self.network {
            config.network = network.parse::<Network>()?;
        }
        if let Some(url) = &self.rpc_url {
            config.rpc_url = url.clone();
        }
        if let Some(score) = &self.cps_score {
            config.cps_score = Some(Address::parse(score.as_str()).context("invalid --cps-score")?);
        }
        if let Some(url) = &self.signer_url {
            config.signer_url = url.clone();
        }
        if let Some(url) = &self.ipfs_base_url {
            config.ipfs_base_url = url.clone();
        }
        if !self.webhook_endpoints.is_empty() {
            config.webhook_endpoints = self.webhook_endpoints.clone();
        }
        if let Some(ms) = self.settle_delay_ms {
            config.settle_delay_ms = ms;
        }
        if let Some(attempts) = self.max_transition_attempts {
            config.max_transition_attempts = attempts;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(config.log_format, &config.log_level);

    let chain = IconRpcClient::new(config.rpc_config()?)?;
    tracing::info!(
        network = config.network.as_str(),
        rpc_url = config.effective_rpc_url(),
        "connected to CPS contract"
    );

    if let Command::Period = cli.command {
        let period = chain.period_check().await?;
        println!("{} ({} remaining)", period.name, format_duration(period.remaining_time));
        return Ok(());
    }

    // Both remaining commands may submit `update_period`.
    config.require_signer()?;
    let content = IpfsClient::with_timeout(&config.ipfs_base_url, config.http_timeout());
    let sink = HttpWebhook::with_timeout(config.webhook_endpoints.clone(), config.http_timeout());
    let ctx = CronContext::new(&chain, &content, &sink, &SystemClock)
        .with_settings(RunSettings::from(&config));

    match cli.command {
        Command::Period => {}
        Command::Run => match ctx.run_once().await? {
            RunReport::Idle(period) => println!("{period}: nothing to do"),
            RunReport::Advanced { from, to, events, .. } => {
                let names: Vec<_> = events.iter().map(|e| e.as_str()).collect();
                println!("{from} -> {}: sent [{}]", to.name, names.join(", "));
            }
        },
        Command::Watch { interval_secs } => {
            if config.webhook_endpoints.is_empty() {
                tracing::warn!("no webhook endpoints configured; boundary runs will fail");
            }
            let shutdown = Arc::new(ShutdownController::new());
            let rx = shutdown.subscribe();
            let signals = Arc::clone(&shutdown);
            tokio::spawn(async move { signals.wait_for_signal().await });

            tracing::info!(interval = %format_duration(interval_secs), "watching");
            run_every(&ctx, Duration::from_secs(interval_secs.max(1)), rx).await;
        }
    }
    Ok(())
}
