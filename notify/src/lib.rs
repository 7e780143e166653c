//! Period-boundary notifications.
//!
//! When the scheduled job moves the contract into a new period it announces
//! the period that just closed to the bot subscribers:
//! - into Application: `votingPeriodStats`, `proposalStats`, `prStats`
//! - into Voting: `applicationPeriodStats`
//!
//! Proposal entries are enriched with team and sponsor names read from each
//! proposal's off-chain metadata. Nothing here retries; failures go back to
//! the caller.

pub mod content;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod payload;
pub mod webhook;

pub use content::{ContentStore, IpfsClient, ProposalMetadata, DEFAULT_IPFS_BASE_URL};
pub use dispatcher::{Dispatcher, DEFAULT_PERIOD_ENDING_DAYS};
pub use error::{ContentStoreError, DeliveryFailure, NotifyError, WebhookError};
pub use event::{EventType, WebhookEvent};
pub use payload::{
    ApplicationPeriodStats, ApprovedProposal, ProgressReportStats, ProposalStats, ProposalSummary,
    RejectedProposal, VotingPeriodStats,
};
pub use webhook::{HttpWebhook, WebhookSink};
