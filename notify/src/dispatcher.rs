//! Gathers period statistics from the chain and pushes them to subscribers.

use cps_chain::ChainClient;
use cps_types::{ProgressReportStatus, Proposal, ProposalStatus, Timestamp};
use serde::Serialize;

use crate::content::{ContentStore, ProposalMetadata};
use crate::error::NotifyError;
use crate::event::{EventType, WebhookEvent};
use crate::payload::{
    budget, ApplicationPeriodStats, ProgressReportStats, ProposalStats, VotingPeriodStats,
};
use crate::webhook::WebhookSink;

/// Periods are announced as ending this many days after the boundary.
pub const DEFAULT_PERIOD_ENDING_DAYS: u64 = 15;

pub struct Dispatcher<'a> {
    chain: &'a dyn ChainClient,
    content: &'a dyn ContentStore,
    sink: &'a dyn WebhookSink,
    period_ending_days: u64,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        chain: &'a dyn ChainClient,
        content: &'a dyn ContentStore,
        sink: &'a dyn WebhookSink,
    ) -> Self {
        Self {
            chain,
            content,
            sink,
            period_ending_days: DEFAULT_PERIOD_ENDING_DAYS,
        }
    }

    pub fn with_period_ending_days(mut self, days: u64) -> Self {
        self.period_ending_days = days;
        self
    }

    fn period_ends_on(&self, now: Timestamp) -> String {
        now.plus_days(self.period_ending_days).as_millis().to_string()
    }

    async fn send<T: Serialize>(
        &self,
        event_type: EventType,
        payload: &T,
    ) -> Result<(), NotifyError> {
        let event = WebhookEvent::new(event_type, payload)?;
        self.sink.deliver(&event).await?;
        Ok(())
    }

    /// The contract just entered the Application period: report on the
    /// Voting period that closed. Returns the events sent, in order.
    pub async fn announce_application_period(
        &self,
        now: Timestamp,
    ) -> Result<Vec<EventType>, NotifyError> {
        let voting = self.voting_period_stats(now).await?;
        self.send(EventType::VotingPeriodStats, &voting).await?;

        let proposals = self.proposal_stats().await?;
        tracing::info!(proposals = proposals.len(), "proposal stats gathered");
        self.send(EventType::ProposalStats, &proposals).await?;

        let reports = self.progress_report_stats().await?;
        self.send(EventType::ProgressReportStats, &reports).await?;

        Ok(vec![
            EventType::VotingPeriodStats,
            EventType::ProposalStats,
            EventType::ProgressReportStats,
        ])
    }

    /// The contract just entered the Voting period: report on the
    /// Application period that closed.
    pub async fn announce_voting_period(
        &self,
        now: Timestamp,
    ) -> Result<Vec<EventType>, NotifyError> {
        let stats = self.application_period_stats(now).await?;
        self.send(EventType::ApplicationPeriodStats, &stats).await?;
        Ok(vec![EventType::ApplicationPeriodStats])
    }

    pub async fn voting_period_stats(
        &self,
        now: Timestamp,
    ) -> Result<VotingPeriodStats, NotifyError> {
        let remaining = self.chain.get_remaining_funds().await?;
        let active = self.chain.get_project_amounts_by_status(ProposalStatus::Active).await?;
        Ok(VotingPeriodStats {
            remaining_funds: budget(remaining),
            period_ends_on: self.period_ends_on(now),
            projects_count: active.count.to_string(),
            total_projects_budget: budget(active.total_amount),
        })
    }

    pub async fn application_period_stats(
        &self,
        now: Timestamp,
    ) -> Result<ApplicationPeriodStats, NotifyError> {
        let pending = self.chain.get_project_amounts_by_status(ProposalStatus::Pending).await?;
        let waiting = self
            .chain
            .get_progress_reports_by_status(ProgressReportStatus::Waiting)
            .await?;
        Ok(ApplicationPeriodStats {
            voting_proposals_count: pending.count.to_string(),
            voting_proposals_budget: budget(pending.total_amount),
            period_ends_on: self.period_ends_on(now),
            voting_prs_count: waiting.to_string(),
        })
    }

    pub async fn progress_report_stats(&self) -> Result<ProgressReportStats, NotifyError> {
        let waiting = self
            .chain
            .get_progress_reports_by_status(ProgressReportStatus::Waiting)
            .await?;
        let approved = self
            .chain
            .get_progress_reports_by_status(ProgressReportStatus::Approved)
            .await?;
        Ok(ProgressReportStats {
            waiting_prs_count: waiting.to_string(),
            approved_prs_count: approved.to_string(),
        })
    }

    /// Outcome lists for the closed Voting period. Approved means active with
    /// no progress yet, i.e. approved in the vote that just ended.
    pub async fn proposal_stats(&self) -> Result<ProposalStats, NotifyError> {
        let mut proposals: Vec<Proposal> = self
            .chain
            .get_proposal_details_by_status(ProposalStatus::Active, false)
            .await?
            .into_iter()
            .filter(|p| p.percentage_completed == 0)
            .collect();
        for status in [
            ProposalStatus::Rejected,
            ProposalStatus::Paused,
            ProposalStatus::Disqualified,
            ProposalStatus::Completed,
        ] {
            proposals.extend(self.chain.get_proposal_details_by_status(status, true).await?);
        }

        let metadata = self.enrich(&proposals).await?;
        Ok(ProposalStats::categorize(proposals.iter().zip(metadata.iter())))
    }

    /// Fetch metadata for every proposal. The first bad reference aborts the
    /// whole batch.
    pub async fn enrich(
        &self,
        proposals: &[Proposal],
    ) -> Result<Vec<ProposalMetadata>, NotifyError> {
        let mut metadata = Vec::with_capacity(proposals.len());
        for proposal in proposals {
            match self.content.fetch_metadata(&proposal.ipfs_hash).await {
                Ok(meta) => metadata.push(meta),
                Err(source) => {
                    tracing::error!(
                        hash = %proposal.ipfs_hash,
                        error = %source,
                        "metadata fetch failed"
                    );
                    return Err(NotifyError::MetadataFetch {
                        hash: proposal.ipfs_hash.clone(),
                        source,
                    });
                }
            }
        }
        Ok(metadata)
    }
}
