//! Vote records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::time::Timestamp;

/// A voter's decision on a proposal, progress report, or budget change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    #[serde(rename = "_approve")]
    Approve,
    #[serde(rename = "_reject")]
    Reject,
    #[serde(rename = "_abstain")]
    Abstain,
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Abstain => "abstain",
        })
    }
}

/// One voter's vote on one target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: Address,
    pub choice: VoteChoice,
    pub reason: String,
    pub timestamp: Timestamp,
}
