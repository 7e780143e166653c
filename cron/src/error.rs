use cps_chain::ChainError;
use cps_governance::PeriodError;
use cps_notify::{ContentStoreError, NotifyError, WebhookError};
use cps_types::PeriodName;
use thiserror::Error;

/// Why an invocation ended early. Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum CronError {
    #[error("external read failed: {0}")]
    ExternalRead(#[source] ChainError),

    #[error("metadata fetch failed for {hash}: {source}")]
    MetadataFetch {
        hash: String,
        #[source]
        source: ContentStoreError,
    },

    #[error("period still {last} after {attempts} update_period attempts")]
    TransitionIncomplete { attempts: u32, last: PeriodName },

    #[error("webhook delivery failed: {0}")]
    WebhookDelivery(#[source] WebhookError),

    #[error("webhook payload could not be encoded: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl From<ChainError> for CronError {
    fn from(e: ChainError) -> Self {
        Self::ExternalRead(e)
    }
}

impl From<PeriodError> for CronError {
    fn from(e: PeriodError) -> Self {
        match e {
            PeriodError::Chain(e) => Self::ExternalRead(e),
            PeriodError::TransitionIncomplete { attempts, last } => {
                Self::TransitionIncomplete { attempts, last }
            }
        }
    }
}

impl From<NotifyError> for CronError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::Chain(e) => Self::ExternalRead(e),
            NotifyError::MetadataFetch { hash, source } => Self::MetadataFetch { hash, source },
            NotifyError::Delivery(e) => Self::WebhookDelivery(e),
            NotifyError::Payload(e) => Self::Payload(e),
        }
    }
}
