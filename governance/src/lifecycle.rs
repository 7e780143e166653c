//! Proposal status transitions driven by vote outcomes.

use cps_types::{Proposal, ProposalStatus, TokenAmount};

use crate::error::GovernanceError;

/// Share of the total budget a sponsor posts as bond when accepting.
pub const SPONSOR_BOND_PERCENT: u128 = 10;

/// Rejected progress reports in a row that disqualify a project.
pub const MAX_CONSECUTIVE_REJECTIONS: u8 = 2;

pub fn sponsor_bond(total_budget: TokenAmount) -> TokenAmount {
    total_budget.percent(SPONSOR_BOND_PERCENT)
}

/// Result of the vote on a progress report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    Approved { percentage_completed: u64 },
    Rejected,
}

/// A proposal's status together with its run of rejected reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProposalLifecycle {
    status: ProposalStatus,
    consecutive_rejections: u8,
}

impl ProposalLifecycle {
    pub fn new(status: ProposalStatus) -> Self {
        Self {
            status,
            consecutive_rejections: 0,
        }
    }

    /// Paused proposals already carry one rejected report.
    pub fn for_proposal(proposal: &Proposal) -> Self {
        Self {
            status: proposal.status,
            consecutive_rejections: u8::from(proposal.status == ProposalStatus::Paused),
        }
    }

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    pub fn consecutive_rejections(&self) -> u8 {
        self.consecutive_rejections
    }

    fn ensure_open(&self) -> Result<(), GovernanceError> {
        if self.status.is_terminal() {
            return Err(GovernanceError::TerminalStatus(self.status));
        }
        Ok(())
    }

    /// Close the Voting period vote on a pending proposal.
    pub fn apply_vote(&mut self, approved: bool) -> Result<ProposalStatus, GovernanceError> {
        self.ensure_open()?;
        if self.status != ProposalStatus::Pending {
            return Err(GovernanceError::WrongStatus(self.status));
        }
        self.status = if approved {
            ProposalStatus::Active
        } else {
            ProposalStatus::Rejected
        };
        Ok(self.status)
    }

    /// Apply the outcome of a progress report vote to the owning proposal.
    pub fn apply_report(
        &mut self,
        outcome: ReportOutcome,
    ) -> Result<ProposalStatus, GovernanceError> {
        self.ensure_open()?;
        if !matches!(self.status, ProposalStatus::Active | ProposalStatus::Paused) {
            return Err(GovernanceError::WrongStatus(self.status));
        }
        self.status = match outcome {
            ReportOutcome::Approved { percentage_completed } => {
                self.consecutive_rejections = 0;
                if percentage_completed >= 100 {
                    ProposalStatus::Completed
                } else {
                    ProposalStatus::Active
                }
            }
            ReportOutcome::Rejected => {
                self.consecutive_rejections = self.consecutive_rejections.saturating_add(1);
                if self.consecutive_rejections >= MAX_CONSECUTIVE_REJECTIONS {
                    ProposalStatus::Disqualified
                } else {
                    ProposalStatus::Paused
                }
            }
        };
        Ok(self.status)
    }
}
