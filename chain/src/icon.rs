//! JSON-RPC client for the CPS contract on an ICON node.
//!
//! Reads go through `icx_call`. `update_period` is a state-changing
//! transaction; it is posted to a signing relay that holds the operator key,
//! so this process never handles private keys.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cps_types::{
    hex_int, Address, Period, ProgressReportStatus, Proposal, ProposalStatus, TokenAmount,
    VoteCounts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::{ChainClient, ProjectAmounts};
use crate::error::ChainError;

/// The contract caps list queries at this many records per call.
const PAGE_SIZE: u64 = 50;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how to reach the contract.
#[derive(Clone, Debug)]
pub struct IconRpcConfig {
    /// Node JSON-RPC endpoint, e.g. `https://ctz.solidwallet.io/api/v3`.
    pub rpc_url: String,
    /// CPS governance contract.
    pub cps_score: Address,
    /// Relay that signs and submits transactions on the operator's behalf.
    /// Only `update_period` needs it; reads work without one.
    pub signer_url: Option<String>,
    pub timeout: Duration,
}

/// [`ChainClient`] over ICON JSON-RPC.
pub struct IconRpcClient {
    http: reqwest::Client,
    config: IconRpcConfig,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default, deserialize_with = "hex_int::deserialize_u64")]
    count: u64,
}

#[derive(Debug, Deserialize)]
struct RelayReceipt {
    #[serde(rename = "txHash")]
    tx_hash: String,
}

/// `get_remaining_funds` answers with a bare amount on older deployments and
/// a per-currency map on newer ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemainingFunds {
    Amount(TokenAmount),
    ByCurrency(std::collections::HashMap<String, TokenAmount>),
}

impl IconRpcClient {
    pub fn new(config: IconRpcConfig) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ChainError::Request {
                endpoint: config.rpc_url.clone(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            config,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn config(&self) -> &IconRpcConfig {
        &self.config
    }

    /// Call a read-only contract method and decode its result.
    async fn icx_call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ChainError> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": "icx_call",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "params": {
                "to": self.config.cps_score.as_str(),
                "dataType": "call",
                "data": { "method": method, "params": params },
            },
        });
        tracing::debug!(method, "icx_call");

        let response = self
            .http
            .post(&self.config.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error(&self.config.rpc_url, e))?;

        if !response.status().is_success() && response.status().as_u16() != 400 {
            // ICON nodes answer contract reverts with HTTP 400 and a JSON-RPC error body.
            return Err(ChainError::HttpStatus(response.status().as_u16()));
        }

        let rpc: RpcResponse = response.json().await.map_err(|e| ChainError::InvalidResponse {
            method: method.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(err) = rpc.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let result = rpc.result.ok_or_else(|| ChainError::InvalidResponse {
            method: method.to_string(),
            reason: "missing result".into(),
        })?;

        serde_json::from_value(result).map_err(|e| ChainError::InvalidResponse {
            method: method.to_string(),
            reason: e.to_string(),
        })
    }

    /// Walk a paginated list query until `count` records have been read.
    async fn paged<T: DeserializeOwned>(
        &self,
        method: &str,
        mut params: Value,
    ) -> Result<(Vec<T>, u64), ChainError> {
        let mut items = Vec::new();
        let mut start = 0u64;
        loop {
            if let Some(obj) = params.as_object_mut() {
                obj.insert("_start_index".into(), json!(hex_int::to_hex(start as u128)));
                let end = hex_int::to_hex((start + PAGE_SIZE) as u128);
                obj.insert("_end_index".into(), json!(end));
            }
            let page: Page<T> = self.icx_call(method, params.clone()).await?;
            let fetched = page.data.len() as u64;
            items.extend(page.data);
            start += PAGE_SIZE;
            if fetched == 0 || start >= page.count {
                return Ok((items, page.count));
            }
        }
    }

    async fn vote_result(&self, key: &str) -> Result<VoteCounts, ChainError> {
        self.icx_call("get_vote_result", json!({ "_ipfs_key": key })).await
    }
}

fn request_error(endpoint: &str, e: reqwest::Error) -> ChainError {
    let reason = if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    };
    ChainError::Request {
        endpoint: endpoint.to_string(),
        reason,
    }
}

#[async_trait]
impl ChainClient for IconRpcClient {
    async fn period_check(&self) -> Result<Period, ChainError> {
        self.icx_call("get_period_status", json!({})).await
    }

    async fn update_period(&self) -> Result<String, ChainError> {
        let signer_url = self.config.signer_url.as_deref().ok_or_else(|| ChainError::Relay {
            method: "update_period".into(),
            reason: "no signing relay configured".into(),
        })?;
        let body = json!({
            "to": self.config.cps_score.as_str(),
            "method": "update_period",
            "params": {},
        });
        let response = self
            .http
            .post(signer_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error(signer_url, e))?;

        if !response.status().is_success() {
            return Err(ChainError::Relay {
                method: "update_period".into(),
                reason: format!("HTTP status {}", response.status()),
            });
        }

        let receipt: RelayReceipt = response.json().await.map_err(|e| ChainError::Relay {
            method: "update_period".into(),
            reason: format!("invalid relay receipt: {e}"),
        })?;
        tracing::info!(tx_hash = %receipt.tx_hash, "update_period submitted");
        Ok(receipt.tx_hash)
    }

    async fn get_proposal_details_by_status(
        &self,
        status: ProposalStatus,
        include_vote_counts: bool,
    ) -> Result<Vec<Proposal>, ChainError> {
        let (mut proposals, _) = self
            .paged::<Proposal>("get_proposal_details", json!({ "_status": status.as_wire() }))
            .await?;
        if include_vote_counts {
            for proposal in &mut proposals {
                proposal.votes = self.vote_result(proposal.key()).await?;
            }
        }
        Ok(proposals)
    }

    async fn get_remaining_funds(&self) -> Result<TokenAmount, ChainError> {
        let funds: RemainingFunds = self.icx_call("get_remaining_funds", json!({})).await?;
        match funds {
            RemainingFunds::Amount(amount) => Ok(amount),
            RemainingFunds::ByCurrency(map) => map
                .get("bnUSD")
                .or_else(|| map.get("ICX"))
                .copied()
                .ok_or_else(|| ChainError::InvalidResponse {
                    method: "get_remaining_funds".into(),
                    reason: "no bnUSD or ICX balance".into(),
                }),
        }
    }

    async fn get_project_amounts_by_status(
        &self,
        status: ProposalStatus,
    ) -> Result<ProjectAmounts, ChainError> {
        self.icx_call("get_project_amounts_by_status", json!({ "_status": status.as_wire() }))
            .await
    }

    async fn get_progress_reports_by_status(
        &self,
        status: ProgressReportStatus,
    ) -> Result<u64, ChainError> {
        let page: Page<Value> = self
            .icx_call(
                "get_progress_reports",
                json!({
                    "_status": status.as_wire(),
                    "_start_index": "0x0",
                    "_end_index": hex_int::to_hex(PAGE_SIZE as u128),
                }),
            )
            .await?;
        Ok(page.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_body_decodes() {
        let json = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32030,"message":"Reverted(0)"}}"#;
        let resp: RpcResponse = serde_json::from_str(json).unwrap();
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().code, -32030);
    }

    #[test]
    fn remaining_funds_accepts_both_shapes() {
        let bare: RemainingFunds = serde_json::from_str(r#""0xde0b6b3a7640000""#).unwrap();
        assert!(matches!(bare, RemainingFunds::Amount(a) if a == TokenAmount::from_tokens(1)));

        let map: RemainingFunds =
            serde_json::from_str(r#"{"ICX": "0x0", "bnUSD": "0xde0b6b3a7640000"}"#).unwrap();
        match map {
            RemainingFunds::ByCurrency(m) => assert_eq!(m["bnUSD"], TokenAmount::from_tokens(1)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn project_amounts_decode() {
        let json = r#"{"_count": "0x3", "_total_amount": "0x1bc16d674ec80000"}"#;
        let amounts: ProjectAmounts = serde_json::from_str(json).unwrap();
        assert_eq!(amounts.count, 3);
        assert_eq!(amounts.total_amount, TokenAmount::from_tokens(2));
    }

    #[test]
    fn page_defaults_when_empty() {
        let page: Page<Value> = serde_json::from_str(r#"{"data": [], "count": "0x0"}"#).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn update_period_without_relay_is_refused() {
        let client = IconRpcClient::new(IconRpcConfig {
            rpc_url: "http://127.0.0.1:1/api/v3".into(),
            cps_score: Address::parse(format!("cx{}", "00".repeat(20))).unwrap(),
            signer_url: None,
            timeout: Duration::from_millis(200),
        })
        .unwrap();
        let err = client.update_period().await.unwrap_err();
        match err {
            ChainError::Relay { reason, .. } => assert!(reason.contains("no signing relay")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_node_is_a_request_error() {
        let client = IconRpcClient::new(IconRpcConfig {
            rpc_url: "http://127.0.0.1:1/api/v3".into(),
            cps_score: Address::parse(format!("cx{}", "00".repeat(20))).unwrap(),
            signer_url: Some("http://127.0.0.1:1/sign".into()),
            timeout: Duration::from_millis(200),
        })
        .unwrap();
        let err = client.period_check().await.unwrap_err();
        assert!(matches!(err, ChainError::Request { .. }));
    }
}
