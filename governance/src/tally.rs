//! Vote tally percentages.
//!
//! One function serves both domains: stake-weighted totals and voter counts.
//! Denominators are the full totals, abstainers included. Percentages carry
//! one decimal place and are truncated, never rounded up, so approved plus
//! rejected never exceeds what was actually cast.

use cps_types::{ProgressReport, Proposal, VoteCounts};
use serde::{Serialize, Serializer};
use std::fmt;

/// A percentage in tenths of a percent, `0..=1000`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u16);

impl Percentage {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(1000);

    /// `part / whole` as a percentage, truncated to one decimal. Zero when
    /// `whole` is zero; `part` above `whole` counts as `whole`.
    pub fn from_ratio(part: u128, whole: u128) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let part = part.min(whole);
        let (part, whole) = if part > u128::MAX / 1000 {
            (part / 1000, whole / 1000)
        } else {
            (part, whole)
        };
        Self((part * 1000 / whole) as u16)
    }

    pub fn from_tenths(tenths: u16) -> Self {
        Self(tenths.min(1000))
    }

    pub fn tenths(&self) -> u16 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 10.0
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Approved, rejected and abstained shares of one vote.
///
/// With a non-zero total the three shares sum to exactly 100.0: truncation
/// error lands in `abstained`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub approved: Percentage,
    pub rejected: Percentage,
    pub abstained: Percentage,
}

/// Tally `approve` and `reject` against `total`.
pub fn tally(approve: u128, reject: u128, total: u128) -> Tally {
    if total == 0 {
        return Tally::default();
    }
    let approve = approve.min(total);
    let reject = reject.min(total - approve);
    let approved = Percentage::from_ratio(approve, total);
    let rejected = Percentage::from_ratio(reject, total);
    Tally {
        approved,
        rejected,
        abstained: Percentage::HUNDRED
            .saturating_sub(approved)
            .saturating_sub(rejected),
    }
}

/// Both tallies of one vote: by stake and by head count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VoteSummary {
    pub by_stake: Tally,
    pub by_voter: Tally,
}

impl VoteSummary {
    pub fn from_counts(counts: &VoteCounts) -> Self {
        Self {
            by_stake: tally(
                counts.approved_votes.raw(),
                counts.rejected_votes.raw(),
                counts.total_votes.raw(),
            ),
            by_voter: tally(
                u128::from(counts.approve_voters),
                u128::from(counts.reject_voters),
                u128::from(counts.total_voters),
            ),
        }
    }

    pub fn for_proposal(proposal: &Proposal) -> Self {
        Self::from_counts(&proposal.votes)
    }
}

/// Tallies for a progress report and, when it asks for a project term
/// revision, for the budget change voted alongside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub report: VoteSummary,
    pub budget_change: Option<VoteSummary>,
}

impl ReportSummary {
    pub fn for_report(report: &ProgressReport) -> Self {
        Self {
            report: VoteSummary::from_counts(&report.votes),
            budget_change: report.budget_change.as_ref().map(VoteSummary::from_counts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cps_types::TokenAmount;

    #[test]
    fn seven_of_ten_voters() {
        let counts = VoteCounts {
            approve_voters: 7,
            reject_voters: 1,
            total_voters: 10,
            ..Default::default()
        };
        let summary = VoteSummary::from_counts(&counts);
        assert_eq!(summary.by_voter.approved.to_string(), "70.0");
        assert_eq!(summary.by_voter.rejected.to_string(), "10.0");
        assert_eq!(summary.by_voter.abstained.to_string(), "20.0");
        assert_eq!(counts.abstain_voters(), 2);
    }

    #[test]
    fn zero_total_is_zero_not_a_fault() {
        let t = tally(0, 0, 0);
        assert_eq!(t.approved, Percentage::ZERO);
        assert_eq!(t.rejected, Percentage::ZERO);
        assert_eq!(t.abstained, Percentage::ZERO);

        let all_abstained = tally(0, 0, 5);
        assert_eq!(all_abstained.abstained, Percentage::HUNDRED);

        let summary = VoteSummary::from_counts(&VoteCounts::default());
        assert_eq!(summary.by_stake, Tally::default());
    }

    #[test]
    fn truncates_to_one_decimal() {
        let t = tally(2, 1, 3);
        assert_eq!(t.approved.tenths(), 666);
        assert_eq!(t.rejected.tenths(), 333);
        assert_eq!(t.abstained.tenths(), 1);
        assert!((t.approved.as_f64() - 66.6).abs() < 1e-9);
    }

    #[test]
    fn counts_above_total_are_clamped() {
        let t = tally(12, 5, 10);
        assert_eq!(t.approved, Percentage::HUNDRED);
        assert_eq!(t.rejected, Percentage::ZERO);
    }

    #[test]
    fn stake_amounts_do_not_overflow() {
        let total = TokenAmount::new(u128::MAX);
        let t = tally(total.raw() / 2, 0, total.raw());
        assert_eq!(t.approved.tenths(), 500);
    }

    #[test]
    fn report_with_term_revision_has_four_tallies() {
        let report = ProgressReport {
            report_key: "report-1".into(),
            ipfs_key: "proposal-1".into(),
            progress_report_title: "Milestone 1".into(),
            status: cps_types::ProgressReportStatus::Waiting,
            votes: VoteCounts {
                approve_voters: 3,
                total_voters: 4,
                approved_votes: TokenAmount::new(30),
                total_votes: TokenAmount::new(40),
                ..Default::default()
            },
            budget_change: Some(VoteCounts {
                reject_voters: 4,
                total_voters: 4,
                rejected_votes: TokenAmount::new(40),
                total_votes: TokenAmount::new(40),
                ..Default::default()
            }),
        };
        let summary = ReportSummary::for_report(&report);
        assert_eq!(summary.report.by_voter.approved.to_string(), "75.0");
        assert_eq!(summary.report.by_stake.approved.to_string(), "75.0");
        let budget = summary.budget_change.unwrap();
        assert_eq!(budget.by_voter.rejected, Percentage::HUNDRED);
        assert_eq!(budget.by_stake.rejected, Percentage::HUNDRED);
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Percentage::from_tenths(705)).unwrap();
        assert_eq!(json, "\"70.5\"");
    }
}
