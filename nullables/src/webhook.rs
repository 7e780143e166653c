//! Nullable webhook: record events instead of posting them.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use cps_notify::{DeliveryFailure, EventType, WebhookError, WebhookEvent, WebhookSink};

/// A webhook sink that records every delivered event.
pub struct NullWebhook {
    delivered: Mutex<Vec<WebhookEvent>>,
    failing: Mutex<HashSet<EventType>>,
}

impl NullWebhook {
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Refuse every event of this type.
    pub fn fail_on(&self, event_type: EventType) {
        self.failing.lock().unwrap().insert(event_type);
    }

    /// All events delivered so far (for assertions).
    pub fn delivered(&self) -> Vec<WebhookEvent> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn delivered_types(&self) -> Vec<EventType> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }

    /// Payload of the first delivered event of this type.
    pub fn payload(&self, event_type: EventType) -> Option<serde_json::Value> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.event_type == event_type)
            .map(|e| e.payload.clone())
    }
}

impl Default for NullWebhook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookSink for NullWebhook {
    async fn deliver(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        if self.failing.lock().unwrap().contains(&event.event_type) {
            return Err(WebhookError::Delivery {
                event: event.event_type,
                failures: vec![DeliveryFailure {
                    endpoint: "null".into(),
                    reason: "refused".into(),
                }],
            });
        }
        self.delivered.lock().unwrap().push(event.clone());
        Ok(())
    }
}
