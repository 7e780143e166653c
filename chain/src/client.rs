//! The chain seam.

use async_trait::async_trait;
use cps_types::{Period, ProgressReportStatus, Proposal, ProposalStatus, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Number of projects in a status and their summed budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAmounts {
    #[serde(rename = "_count", deserialize_with = "cps_types::hex_int::deserialize_u64")]
    pub count: u64,
    #[serde(rename = "_total_amount", default)]
    pub total_amount: TokenAmount,
}

/// Read and transition operations on the CPS contract.
///
/// Implementations perform exactly one logical operation per call and never
/// retry; retrying is left to the next scheduled run.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current period and the seconds left in it.
    async fn period_check(&self) -> Result<Period, ChainError>;

    /// Submit the `update_period` transaction. Returns the transaction hash.
    async fn update_period(&self) -> Result<String, ChainError>;

    /// All proposals in `status`. With `include_vote_counts`, each proposal's
    /// vote totals are filled in from the vote-result query.
    async fn get_proposal_details_by_status(
        &self,
        status: ProposalStatus,
        include_vote_counts: bool,
    ) -> Result<Vec<Proposal>, ChainError>;

    /// Funds left in the treasury for the coming period.
    async fn get_remaining_funds(&self) -> Result<TokenAmount, ChainError>;

    async fn get_project_amounts_by_status(
        &self,
        status: ProposalStatus,
    ) -> Result<ProjectAmounts, ChainError>;

    /// Number of progress reports in `status`.
    async fn get_progress_reports_by_status(
        &self,
        status: ProgressReportStatus,
    ) -> Result<u64, ChainError>;
}
