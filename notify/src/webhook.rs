//! Webhook delivery.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{DeliveryFailure, WebhookError};
use crate::event::WebhookEvent;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Destination for webhook events.
///
/// One `deliver` call is one attempt; there is no retry.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn deliver(&self, event: &WebhookEvent) -> Result<(), WebhookError>;
}

/// Posts events as JSON to every subscribed endpoint.
pub struct HttpWebhook {
    http: reqwest::Client,
    endpoints: Vec<String>,
}

impl HttpWebhook {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self::with_timeout(endpoints, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoints: Vec<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}

#[async_trait]
impl WebhookSink for HttpWebhook {
    /// Every endpoint gets the event even when an earlier one fails; the
    /// failures are reported together.
    async fn deliver(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        if self.endpoints.is_empty() {
            return Err(WebhookError::NoEndpoints);
        }

        let mut failures = Vec::new();
        for endpoint in &self.endpoints {
            let result = self.http.post(endpoint).json(event).send().await;
            let reason = match result {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!(
                        event = %event.event_type,
                        endpoint = %endpoint,
                        "webhook delivered"
                    );
                    continue;
                }
                Ok(resp) => format!("HTTP status {}", resp.status()),
                Err(e) if e.is_timeout() => format!("request timed out: {e}"),
                Err(e) => e.to_string(),
            };
            tracing::warn!(
                event = %event.event_type,
                endpoint = %endpoint,
                %reason,
                "webhook delivery failed"
            );
            failures.push(DeliveryFailure {
                endpoint: endpoint.clone(),
                reason,
            });
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(WebhookError::Delivery {
                event: event.event_type,
                failures,
            })
        }
    }
}
