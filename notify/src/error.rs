use cps_chain::ChainError;
use thiserror::Error;

use crate::event::EventType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentStoreError {
    /// The hash is malformed or the store does not know it.
    #[error("bad content reference: {0}")]
    BadReference(String),

    #[error("content store request failed: {0}")]
    RequestFailed(String),

    #[error("content store unreachable: {0}")]
    Unreachable(String),

    #[error("invalid metadata document: {0}")]
    InvalidResponse(String),
}

/// One endpoint that did not accept an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub endpoint: String,
    pub reason: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error("{event} not delivered to {} endpoint(s): {}", .failures.len(), describe(.failures))]
    Delivery {
        event: EventType,
        failures: Vec<DeliveryFailure>,
    },

    #[error("no webhook endpoints configured")]
    NoEndpoints,
}

fn describe(failures: &[DeliveryFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.endpoint, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("chain read failed: {0}")]
    Chain(#[from] ChainError),

    #[error("metadata fetch failed for {hash}: {source}")]
    MetadataFetch {
        hash: String,
        #[source]
        source: ContentStoreError,
    },

    #[error("webhook delivery failed: {0}")]
    Delivery(#[from] WebhookError),

    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}
