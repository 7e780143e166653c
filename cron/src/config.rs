//! Job configuration with TOML file support.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use cps_chain::IconRpcConfig;
use cps_notify::DEFAULT_IPFS_BASE_URL;
use cps_types::Address;
use cps_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::error::CronError;

/// ICON network the contract lives on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Lisbon,
    #[default]
    Dev,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Lisbon => "lisbon",
            Self::Dev => "dev",
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://ctz.solidwallet.io/api/v3",
            Self::Lisbon => "https://lisbon.net.solidwallet.io/api/v3",
            Self::Dev => "http://localhost:9000/api/v3",
        }
    }
}

impl FromStr for Network {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "lisbon" | "testnet" => Ok(Self::Lisbon),
            "dev" | "local" => Ok(Self::Dev),
            other => Err(CronError::Config(format!("unknown network: {other}"))),
        }
    }
}

/// Configuration for the scheduled job.
///
/// Loaded from a TOML file via [`CronConfig::from_toml_file`]; the binary
/// layers CLI flags and `CPS_*` environment variables on top.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CronConfig {
    #[serde(default)]
    pub network: Network,

    /// JSON-RPC endpoint. Empty means the network's default.
    #[serde(default)]
    pub rpc_url: String,

    /// CPS governance contract address.
    #[serde(default)]
    pub cps_score: Option<Address>,

    /// Transaction relay that signs `update_period` calls.
    #[serde(default)]
    pub signer_url: String,

    #[serde(default = "default_ipfs_base_url")]
    pub ipfs_base_url: String,

    /// Bot subscriber endpoints that receive every event.
    #[serde(default)]
    pub webhook_endpoints: Vec<String>,

    /// Pause between `update_period` and the following period read.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_max_transition_attempts")]
    pub max_transition_attempts: u32,

    /// Announced period length, counted from the boundary.
    #[serde(default = "default_period_ending_days")]
    pub period_ending_days: u64,

    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive, e.g. `"info"` or `"debug,cps_chain=trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_ipfs_base_url() -> String {
    DEFAULT_IPFS_BASE_URL.to_string()
}

fn default_settle_delay_ms() -> u64 {
    2_000
}

fn default_max_transition_attempts() -> u32 {
    5
}

fn default_period_ending_days() -> u64 {
    15
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CronConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, CronError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CronError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, CronError> {
        toml::from_str(s).map_err(|e| CronError::Config(format!("failed to parse config: {e}")))
    }

    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn effective_rpc_url(&self) -> &str {
        if self.rpc_url.is_empty() {
            self.network.default_rpc_url()
        } else {
            &self.rpc_url
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Settings for the contract client. Fails when the contract address is
    /// missing; a client without a signing relay can still read.
    pub fn rpc_config(&self) -> Result<IconRpcConfig, CronError> {
        let cps_score = self
            .cps_score
            .clone()
            .ok_or_else(|| CronError::Config("cps_score is not set".into()))?;
        let signer_url = Some(self.signer_url.clone()).filter(|url| !url.is_empty());
        Ok(IconRpcConfig {
            rpc_url: self.effective_rpc_url().to_string(),
            cps_score,
            signer_url,
            timeout: self.http_timeout(),
        })
    }

    /// `run` and `watch` may call `update_period`, which needs the relay.
    pub fn require_signer(&self) -> Result<(), CronError> {
        if self.signer_url.is_empty() {
            return Err(CronError::Config("signer_url is not set".into()));
        }
        Ok(())
    }
}

impl Default for CronConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            rpc_url: String::new(),
            cps_score: None,
            signer_url: String::new(),
            ipfs_base_url: default_ipfs_base_url(),
            webhook_endpoints: Vec::new(),
            settle_delay_ms: default_settle_delay_ms(),
            max_transition_attempts: default_max_transition_attempts(),
            period_ending_days: default_period_ending_days(),
            http_timeout_secs: default_http_timeout_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
