//! Off-chain proposal metadata, addressed by content hash.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ContentStoreError;

pub const DEFAULT_IPFS_BASE_URL: &str = "https://gateway.ipfs.io/ipfs/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// The fields of a proposal document the notifications use.
///
/// The submission form has always spelled the sponsor field `sponserPrepName`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default, rename = "sponserPrepName", alias = "sponsorPrepName")]
    pub sponsor_prep_name: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Lookup of proposal documents by content hash.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch_metadata(&self, hash: &str) -> Result<ProposalMetadata, ContentStoreError>;
}

/// Content hashes are base-encoded CIDs: plain ASCII alphanumerics.
pub fn is_well_formed_hash(hash: &str) -> bool {
    !hash.is_empty() && hash.len() <= 128 && hash.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// [`ContentStore`] backed by an IPFS HTTP gateway.
///
/// Sends `GET {base_url}{hash}` and parses the JSON document.
pub struct IpfsClient {
    http: reqwest::Client,
    base_url: String,
}

impl IpfsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { http, base_url }
    }

    pub fn url_for(&self, hash: &str) -> String {
        format!("{}{}", self.base_url, hash)
    }
}

impl Default for IpfsClient {
    fn default() -> Self {
        Self::new(DEFAULT_IPFS_BASE_URL)
    }
}

#[async_trait]
impl ContentStore for IpfsClient {
    async fn fetch_metadata(&self, hash: &str) -> Result<ProposalMetadata, ContentStoreError> {
        if !is_well_formed_hash(hash) {
            return Err(ContentStoreError::BadReference(hash.to_string()));
        }

        let response = self.http.get(self.url_for(hash)).send().await.map_err(|e| {
            if e.is_timeout() {
                ContentStoreError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                ContentStoreError::Unreachable(format!("connection failed: {e}"))
            } else {
                ContentStoreError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_client_error() {
            return Err(ContentStoreError::BadReference(format!("{hash} (HTTP {status})")));
        }
        if !status.is_success() {
            return Err(ContentStoreError::RequestFailed(format!("HTTP status {status}")));
        }

        response.json().await.map_err(|e| {
            ContentStoreError::InvalidResponse(format!("failed to parse metadata: {e}"))
        })
    }
}
