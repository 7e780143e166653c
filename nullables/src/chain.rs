//! Nullable chain: a scripted CPS contract.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use cps_chain::{ChainClient, ChainError, ProjectAmounts};
use cps_types::{Period, ProgressReportStatus, Proposal, ProposalStatus, TokenAmount};

/// An in-memory contract for testing.
///
/// `period_check` replays the scripted periods in order and keeps returning
/// the last one once the script is exhausted. Every `update_period` call is
/// counted so tests can assert on mutations.
pub struct NullChain {
    periods: Mutex<VecDeque<Period>>,
    period_checks: Mutex<usize>,
    update_calls: Mutex<usize>,
    period_check_failure: Mutex<Option<String>>,
    update_failure: Mutex<Option<String>>,
    proposals: Mutex<HashMap<ProposalStatus, Vec<Proposal>>>,
    proposal_queries: Mutex<Vec<(ProposalStatus, bool)>>,
    project_amounts: Mutex<HashMap<ProposalStatus, ProjectAmounts>>,
    report_counts: Mutex<HashMap<ProgressReportStatus, u64>>,
    remaining_funds: Mutex<TokenAmount>,
}

impl NullChain {
    pub fn new() -> Self {
        Self {
            periods: Mutex::new(VecDeque::new()),
            period_checks: Mutex::new(0),
            update_calls: Mutex::new(0),
            period_check_failure: Mutex::new(None),
            update_failure: Mutex::new(None),
            proposals: Mutex::new(HashMap::new()),
            proposal_queries: Mutex::new(Vec::new()),
            project_amounts: Mutex::new(HashMap::new()),
            report_counts: Mutex::new(HashMap::new()),
            remaining_funds: Mutex::new(TokenAmount::ZERO),
        }
    }

    /// Append a period to the `period_check` script.
    pub fn push_period(&self, period: Period) {
        self.periods.lock().unwrap().push_back(period);
    }

    /// Make every `period_check` fail.
    pub fn fail_period_check(&self, reason: &str) {
        *self.period_check_failure.lock().unwrap() = Some(reason.to_string());
    }

    /// Make every `update_period` fail.
    pub fn fail_update_period(&self, reason: &str) {
        *self.update_failure.lock().unwrap() = Some(reason.to_string());
    }

    pub fn set_proposals(&self, status: ProposalStatus, proposals: Vec<Proposal>) {
        self.proposals.lock().unwrap().insert(status, proposals);
    }

    pub fn set_project_amounts(&self, status: ProposalStatus, amounts: ProjectAmounts) {
        self.project_amounts.lock().unwrap().insert(status, amounts);
    }

    pub fn set_progress_report_count(&self, status: ProgressReportStatus, count: u64) {
        self.report_counts.lock().unwrap().insert(status, count);
    }

    pub fn set_remaining_funds(&self, amount: TokenAmount) {
        *self.remaining_funds.lock().unwrap() = amount;
    }

    /// Number of `update_period` calls, failed ones included.
    pub fn update_calls(&self) -> usize {
        *self.update_calls.lock().unwrap()
    }

    pub fn period_checks(&self) -> usize {
        *self.period_checks.lock().unwrap()
    }

    /// `(status, include_vote_counts)` of every proposal query, in order.
    pub fn proposal_queries(&self) -> Vec<(ProposalStatus, bool)> {
        self.proposal_queries.lock().unwrap().clone()
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for NullChain {
    async fn period_check(&self) -> Result<Period, ChainError> {
        *self.period_checks.lock().unwrap() += 1;
        if let Some(reason) = self.period_check_failure.lock().unwrap().clone() {
            return Err(ChainError::Request {
                endpoint: "null".into(),
                reason,
            });
        }
        let mut periods = self.periods.lock().unwrap();
        let period = if periods.len() > 1 {
            periods.pop_front()
        } else {
            periods.front().copied()
        };
        period.ok_or_else(|| ChainError::InvalidResponse {
            method: "get_period_status".into(),
            reason: "no period scripted".into(),
        })
    }

    async fn update_period(&self) -> Result<String, ChainError> {
        let mut calls = self.update_calls.lock().unwrap();
        *calls += 1;
        if let Some(reason) = self.update_failure.lock().unwrap().clone() {
            return Err(ChainError::Relay {
                method: "update_period".into(),
                reason,
            });
        }
        Ok(format!("0x{:064x}", *calls))
    }

    async fn get_proposal_details_by_status(
        &self,
        status: ProposalStatus,
        include_vote_counts: bool,
    ) -> Result<Vec<Proposal>, ChainError> {
        self.proposal_queries
            .lock()
            .unwrap()
            .push((status, include_vote_counts));
        Ok(self
            .proposals
            .lock()
            .unwrap()
            .get(&status)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_remaining_funds(&self) -> Result<TokenAmount, ChainError> {
        Ok(*self.remaining_funds.lock().unwrap())
    }

    async fn get_project_amounts_by_status(
        &self,
        status: ProposalStatus,
    ) -> Result<ProjectAmounts, ChainError> {
        Ok(self
            .project_amounts
            .lock()
            .unwrap()
            .get(&status)
            .copied()
            .unwrap_or_default())
    }

    async fn get_progress_reports_by_status(
        &self,
        status: ProgressReportStatus,
    ) -> Result<u64, ChainError> {
        Ok(self
            .report_counts
            .lock()
            .unwrap()
            .get(&status)
            .copied()
            .unwrap_or(0))
    }
}
