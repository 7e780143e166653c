use cps_chain::ChainError;
use cps_types::{PeriodName, ProposalStatus};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("wallet {0} has already voted on this target")]
    AlreadyVoted(String),

    #[error("proposal is {0}, which is terminal")]
    TerminalStatus(ProposalStatus),

    #[error("proposal is {0}, not in the correct status for this action")]
    WrongStatus(ProposalStatus),
}

/// Failures of the period transition protocol.
#[derive(Debug, Error)]
pub enum PeriodError {
    #[error("chain call failed: {0}")]
    Chain(#[from] ChainError),

    #[error("period still {last} after {attempts} update_period attempts")]
    TransitionIncomplete { attempts: u32, last: PeriodName },
}
