//! Statistics payloads, in the shape the bot subscribers read.
//!
//! Counts and amounts are strings. Budgets and funds are whole tokens with two
//! decimals; stake-weighted vote totals stay in loop. Percentages are
//! `"70.0"`-style strings with one decimal.

use cps_governance::{Percentage, VoteSummary};
use cps_types::{Proposal, ProposalStatus, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::content::ProposalMetadata;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingPeriodStats {
    pub remaining_funds: String,
    /// Milliseconds since epoch.
    pub period_ends_on: String,
    pub projects_count: String,
    pub total_projects_budget: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPeriodStats {
    pub voting_proposals_count: String,
    pub voting_proposals_budget: String,
    pub period_ends_on: String,
    #[serde(rename = "votingPRsCount")]
    pub voting_prs_count: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReportStats {
    #[serde(rename = "waitingPRsCount")]
    pub waiting_prs_count: String,
    #[serde(rename = "approvedPRsCount")]
    pub approved_prs_count: String,
}

/// Fields every proposal entry carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub proposal_name: String,
    pub total_budget: String,
    pub team_name: Option<String>,
    pub sponsor_address: Option<String>,
    pub sponsor_name: Option<String>,
    pub sponsor_vote_reason: Option<String>,
}

impl ProposalSummary {
    pub fn new(proposal: &Proposal, metadata: &ProposalMetadata) -> Self {
        Self {
            proposal_name: proposal.project_title.clone(),
            total_budget: proposal.total_budget.to_decimal_string(),
            team_name: metadata.team_name.clone(),
            sponsor_address: proposal.sponsor_address.clone(),
            sponsor_name: metadata.sponsor_prep_name.clone(),
            sponsor_vote_reason: proposal.sponsor_vote_reason.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedProposal {
    #[serde(flatten)]
    pub summary: ProposalSummary,
    pub approving_voters: String,
    pub approving_voters_percentage: Percentage,
    pub approved_votes: String,
    pub approved_votes_percentage: Percentage,
}

impl ApprovedProposal {
    pub fn new(proposal: &Proposal, metadata: &ProposalMetadata) -> Self {
        let tally = VoteSummary::for_proposal(proposal);
        Self {
            summary: ProposalSummary::new(proposal, metadata),
            approving_voters: proposal.votes.approve_voters.to_string(),
            approving_voters_percentage: tally.by_voter.approved,
            approved_votes: proposal.votes.approved_votes.raw().to_string(),
            approved_votes_percentage: tally.by_stake.approved,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedProposal {
    #[serde(flatten)]
    pub summary: ProposalSummary,
    pub rejecting_voters: String,
    pub rejecting_voters_percentage: Percentage,
    pub rejected_votes: String,
    pub rejected_votes_percentage: Percentage,
    pub abstaining_voters: String,
    pub abstained_votes: String,
}

impl RejectedProposal {
    pub fn new(proposal: &Proposal, metadata: &ProposalMetadata) -> Self {
        let tally = VoteSummary::for_proposal(proposal);
        Self {
            summary: ProposalSummary::new(proposal, metadata),
            rejecting_voters: proposal.votes.reject_voters.to_string(),
            rejecting_voters_percentage: tally.by_voter.rejected,
            rejected_votes: proposal.votes.rejected_votes.raw().to_string(),
            rejected_votes_percentage: tally.by_stake.rejected,
            abstaining_voters: proposal.votes.abstain_voters().to_string(),
            abstained_votes: proposal.votes.abstained_votes().raw().to_string(),
        }
    }
}

/// Proposals grouped by outcome, one bucket per status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalStats {
    pub approved_proposals: Vec<ApprovedProposal>,
    pub rejected_proposals: Vec<RejectedProposal>,
    pub paused_proposals: Vec<ProposalSummary>,
    pub disqualified_proposals: Vec<ProposalSummary>,
    pub completed_proposals: Vec<ProposalSummary>,
}

impl ProposalStats {
    /// Place each proposal in the bucket for its status. Active proposals
    /// count as approved; pending ones have no bucket and are skipped.
    pub fn categorize<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a Proposal, &'a ProposalMetadata)>,
    {
        let mut stats = Self::default();
        for (proposal, metadata) in entries {
            let summary = || ProposalSummary::new(proposal, metadata);
            match proposal.status {
                ProposalStatus::Active => stats
                    .approved_proposals
                    .push(ApprovedProposal::new(proposal, metadata)),
                ProposalStatus::Rejected => stats
                    .rejected_proposals
                    .push(RejectedProposal::new(proposal, metadata)),
                ProposalStatus::Paused => stats.paused_proposals.push(summary()),
                ProposalStatus::Disqualified => stats.disqualified_proposals.push(summary()),
                ProposalStatus::Completed => stats.completed_proposals.push(summary()),
                ProposalStatus::Pending => {}
            }
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.approved_proposals.len()
            + self.rejected_proposals.len()
            + self.paused_proposals.len()
            + self.disqualified_proposals.len()
            + self.completed_proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Budget figure as emitted in payloads.
pub fn budget(amount: TokenAmount) -> String {
    amount.to_decimal_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cps_types::VoteCounts;
    use serde_json::json;

    fn proposal(title: &str, status: ProposalStatus) -> Proposal {
        Proposal {
            ipfs_hash: format!("Qm{title}"),
            ipfs_key: None,
            project_title: title.into(),
            status,
            total_budget: TokenAmount::from_tokens(1_000),
            contributor_address: None,
            sponsor_address: Some("hx0000000000000000000000000000000000000001".into()),
            sponsor_vote_reason: Some("solid plan".into()),
            percentage_completed: 0,
            votes: VoteCounts {
                approve_voters: 7,
                reject_voters: 1,
                total_voters: 10,
                approved_votes: TokenAmount::new(700),
                rejected_votes: TokenAmount::new(100),
                total_votes: TokenAmount::new(1_000),
            },
        }
    }

    fn meta() -> ProposalMetadata {
        ProposalMetadata {
            team_name: Some("Team".into()),
            sponsor_prep_name: Some("Sponsor".into()),
            ..Default::default()
        }
    }

    #[test]
    fn each_status_lands_in_exactly_one_bucket() {
        let proposals: Vec<Proposal> = ProposalStatus::ALL
            .iter()
            .map(|s| proposal(s.as_wire(), *s))
            .collect();
        let m = meta();
        let stats = ProposalStats::categorize(proposals.iter().map(|p| (p, &m)));
        assert_eq!(stats.approved_proposals.len(), 1);
        assert_eq!(stats.rejected_proposals.len(), 1);
        assert_eq!(stats.paused_proposals.len(), 1);
        assert_eq!(stats.disqualified_proposals.len(), 1);
        assert_eq!(stats.completed_proposals.len(), 1);
        assert_eq!(stats.len(), 5);
        assert_eq!(stats.paused_proposals[0].proposal_name, "_paused");
    }

    #[test]
    fn approved_entry_wire_shape() {
        let p = proposal("Explorer", ProposalStatus::Active);
        let value = serde_json::to_value(ApprovedProposal::new(&p, &meta())).unwrap();
        assert_eq!(
            value,
            json!({
                "proposalName": "Explorer",
                "totalBudget": "1000.00",
                "teamName": "Team",
                "sponsorAddress": "hx0000000000000000000000000000000000000001",
                "sponsorName": "Sponsor",
                "sponsorVoteReason": "solid plan",
                "approvingVoters": "7",
                "approvingVotersPercentage": "70.0",
                "approvedVotes": "700",
                "approvedVotesPercentage": "70.0",
            })
        );
    }

    #[test]
    fn rejected_entry_counts_abstentions() {
        let p = proposal("Wallet", ProposalStatus::Rejected);
        let entry = RejectedProposal::new(&p, &meta());
        assert_eq!(entry.rejecting_voters_percentage.to_string(), "10.0");
        assert_eq!(entry.abstaining_voters, "2");
        assert_eq!(entry.abstained_votes, "200");
    }
}
