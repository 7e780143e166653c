//! Per-target vote records.

use std::collections::BTreeMap;

use cps_types::{Address, Vote, VoteChoice, VoteCounts};

use crate::error::GovernanceError;

/// The votes cast on one proposal, progress report, or budget change.
///
/// Holds at most one vote per voter. A second vote is refused unless the
/// caller passes `change_vote`, in which case it replaces the first.
#[derive(Clone, Debug, Default)]
pub struct VoteBook {
    votes: BTreeMap<Address, Vote>,
}

impl VoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `vote`. Returns the vote it superseded, if any.
    pub fn cast(&mut self, vote: Vote, change_vote: bool) -> Result<Option<Vote>, GovernanceError> {
        if self.votes.contains_key(&vote.voter) && !change_vote {
            return Err(GovernanceError::AlreadyVoted(vote.voter.to_string()));
        }
        Ok(self.votes.insert(vote.voter.clone(), vote))
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.votes.contains_key(voter)
    }

    pub fn get(&self, voter: &Address) -> Option<&Vote> {
        self.votes.get(voter)
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Head-count totals against `eligible_voters`. Abstentions count toward the
    /// total, and the total never falls below the number of votes recorded.
    pub fn voter_counts(&self, eligible_voters: u64) -> VoteCounts {
        let count = |choice: VoteChoice| {
            self.votes.values().filter(|v| v.choice == choice).count() as u64
        };
        VoteCounts {
            approve_voters: count(VoteChoice::Approve),
            reject_voters: count(VoteChoice::Reject),
            total_voters: eligible_voters.max(self.votes.len() as u64),
            ..Default::default()
        }
    }
}
