//! Fundamental types for the CPS governance core.
//!
//! This crate defines the values shared by every other crate in the workspace:
//! addresses, fixed-point token amounts, timestamps, governance periods,
//! proposal and progress-report records, and vote records.

pub mod address;
pub mod amount;
pub mod error;
pub mod hex_int;
pub mod period;
pub mod proposal;
pub mod status;
pub mod time;
pub mod vote;

pub use address::Address;
pub use amount::TokenAmount;
pub use error::TypeError;
pub use period::{Period, PeriodName};
pub use proposal::{ProgressReport, Proposal, VoteCounts};
pub use status::{ProgressReportStatus, ProposalStatus};
pub use time::{Clock, SystemClock, Timestamp};
pub use vote::{Vote, VoteChoice};
