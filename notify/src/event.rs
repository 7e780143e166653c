//! Webhook event envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of statistics an event carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "proposalStats")]
    ProposalStats,
    #[serde(rename = "prStats")]
    ProgressReportStats,
    #[serde(rename = "votingPeriodStats")]
    VotingPeriodStats,
    #[serde(rename = "applicationPeriodStats")]
    ApplicationPeriodStats,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProposalStats => "proposalStats",
            Self::ProgressReportStats => "prStats",
            Self::VotingPeriodStats => "votingPeriodStats",
            Self::ApplicationPeriodStats => "applicationPeriodStats",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body posted to every subscriber: `{"eventType": …, "payload": …}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    pub event_type: EventType,
    pub payload: serde_json::Value,
}

impl WebhookEvent {
    pub fn new<T: Serialize>(
        event_type: EventType,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type,
            payload: serde_json::to_value(payload)?,
        })
    }
}
