//! Governance rules for the Contribution Proposal System.
//!
//! Proposals move through Application and Voting periods:
//! sponsor (Application) → vote (Voting) → active → progress reports → completed.
//! A rejected progress report pauses the project; two in a row disqualify it.
//!
//! Everything here except [`period::PeriodResolver`] is pure and synchronous,
//! so the dashboard and the scheduled job derive the same display state from
//! the same inputs.

pub mod actions;
pub mod error;
pub mod lifecycle;
pub mod period;
pub mod status;
pub mod tally;
pub mod validation;
pub mod votes;

pub use actions::{
    prep_actions, progress_report_actions, proposal_actions, PrepActions, ProposalActions,
    ReportActions, Viewer,
};
pub use error::{GovernanceError, PeriodError};
pub use lifecycle::{sponsor_bond, ProposalLifecycle, ReportOutcome};
pub use period::{PeriodOutcome, PeriodResolver};
pub use status::{classify_progress_report, classify_proposal, DisplayStatus};
pub use tally::{tally, Percentage, ReportSummary, Tally, VoteSummary};
pub use validation::{
    validate_sponsor_decision, validate_vote, Field, FieldError, SponsorChoice,
    SponsorDecisionForm, Validation, VoteForm,
};
pub use votes::VoteBook;
