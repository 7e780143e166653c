//! Proposal and progress-report records as returned by the CPS contract.

use serde::{Deserialize, Serialize};

use crate::amount::TokenAmount;
use crate::hex_int;
use crate::status::{ProgressReportStatus, ProposalStatus};

/// Vote totals for one target (proposal, report, or budget change).
///
/// Voter counts are people; the `*_votes` fields are stake-weighted. The
/// totals include voters that abstained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    #[serde(default, deserialize_with = "hex_int::deserialize_u64")]
    pub approve_voters: u64,
    #[serde(default, deserialize_with = "hex_int::deserialize_u64")]
    pub reject_voters: u64,
    #[serde(default, deserialize_with = "hex_int::deserialize_u64")]
    pub total_voters: u64,
    #[serde(default)]
    pub approved_votes: TokenAmount,
    #[serde(default)]
    pub rejected_votes: TokenAmount,
    #[serde(default)]
    pub total_votes: TokenAmount,
}

impl VoteCounts {
    /// Voters that neither approved nor rejected. Never negative.
    pub fn abstain_voters(&self) -> u64 {
        self.total_voters
            .saturating_sub(self.approve_voters)
            .saturating_sub(self.reject_voters)
    }

    /// Stake that neither approved nor rejected. Never negative.
    pub fn abstained_votes(&self) -> TokenAmount {
        self.total_votes
            .saturating_sub(self.approved_votes)
            .saturating_sub(self.rejected_votes)
    }

    /// Whether the counts satisfy `approve + reject <= total` in both domains.
    pub fn is_consistent(&self) -> bool {
        self.approve_voters.saturating_add(self.reject_voters) <= self.total_voters
            && self.approved_votes.raw().saturating_add(self.rejected_votes.raw())
                <= self.total_votes.raw()
    }
}

/// A funding proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Content hash of the proposal's off-chain metadata.
    pub ipfs_hash: String,
    /// On-chain key. Older contract versions omit it and key by hash.
    #[serde(default)]
    pub ipfs_key: Option<String>,
    #[serde(default)]
    pub project_title: String,
    pub status: ProposalStatus,
    #[serde(default)]
    pub total_budget: TokenAmount,
    #[serde(default)]
    pub contributor_address: Option<String>,
    #[serde(default)]
    pub sponsor_address: Option<String>,
    #[serde(default)]
    pub sponsor_vote_reason: Option<String>,
    #[serde(default, deserialize_with = "hex_int::deserialize_u64")]
    pub percentage_completed: u64,
    #[serde(flatten)]
    pub votes: VoteCounts,
}

impl Proposal {
    pub fn key(&self) -> &str {
        self.ipfs_key.as_deref().unwrap_or(&self.ipfs_hash)
    }
}

/// A milestone update submitted against an active proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub report_key: String,
    /// Key of the owning proposal.
    pub ipfs_key: String,
    #[serde(default)]
    pub progress_report_title: String,
    pub status: ProgressReportStatus,
    #[serde(flatten)]
    pub votes: VoteCounts,
    /// Set when the report also asks for a project term revision.
    #[serde(default)]
    pub budget_change: Option<VoteCounts>,
}

impl ProgressReport {
    pub fn has_term_revision(&self) -> bool {
        self.budget_change.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abstentions_saturate() {
        let counts = VoteCounts {
            approve_voters: 7,
            reject_voters: 1,
            total_voters: 10,
            ..Default::default()
        };
        assert_eq!(counts.abstain_voters(), 2);
        assert!(counts.is_consistent());

        let broken = VoteCounts {
            approve_voters: 9,
            reject_voters: 3,
            total_voters: 10,
            ..Default::default()
        };
        assert_eq!(broken.abstain_voters(), 0);
        assert!(!broken.is_consistent());
    }

    #[test]
    fn decodes_contract_record() {
        let json = r#"{
            "ipfs_hash": "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
            "project_title": "Explorer",
            "status": "_active",
            "total_budget": "0x3635c9adc5dea00000",
            "sponsor_address": "hx0000000000000000000000000000000000000001",
            "percentage_completed": "0x0",
            "approve_voters": "0x7",
            "reject_voters": "0x1",
            "total_voters": "0xa",
            "approved_votes": "0x64",
            "rejected_votes": "0xa",
            "total_votes": "0xc8"
        }"#;
        let proposal: Proposal = serde_json::from_str(json).unwrap();
        assert_eq!(proposal.status, ProposalStatus::Active);
        assert_eq!(proposal.total_budget, TokenAmount::from_tokens(1000));
        assert_eq!(proposal.votes.total_voters, 10);
        assert_eq!(proposal.votes.abstained_votes(), TokenAmount::new(90));
        assert_eq!(proposal.key(), proposal.ipfs_hash);
    }
}
