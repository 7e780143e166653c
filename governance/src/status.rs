//! Display status classification.
//!
//! Maps a raw contract status plus the current period to the single status
//! the dashboard shows. Total over its inputs: unrecognised raw strings map to
//! [`DisplayStatus::Unknown`], which the dashboard hides.

use cps_types::{PeriodName, ProgressReportStatus, ProposalStatus};
use serde::Serialize;
use std::fmt;

/// Human-facing lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayStatus {
    Pending,
    Active,
    Voting,
    Approved,
    Rejected,
    Paused,
    Disqualified,
    Completed,
    Unknown,
}

impl DisplayStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Voting => "Voting",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Paused => "Paused",
            Self::Disqualified => "Disqualified",
            Self::Completed => "Completed",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display status of a proposal with raw status `raw` during `period`.
///
/// A pending proposal is shown as `Voting` while the Voting period runs.
pub fn classify_proposal(raw: &str, period: PeriodName) -> DisplayStatus {
    match ProposalStatus::parse(raw) {
        Some(status) => proposal_display(status, period),
        None => DisplayStatus::Unknown,
    }
}

pub fn proposal_display(status: ProposalStatus, period: PeriodName) -> DisplayStatus {
    match (status, period) {
        (ProposalStatus::Pending, PeriodName::Voting) => DisplayStatus::Voting,
        (ProposalStatus::Pending, _) => DisplayStatus::Pending,
        (ProposalStatus::Active, _) => DisplayStatus::Active,
        (ProposalStatus::Paused, _) => DisplayStatus::Paused,
        (ProposalStatus::Completed, _) => DisplayStatus::Completed,
        (ProposalStatus::Disqualified, _) => DisplayStatus::Disqualified,
        (ProposalStatus::Rejected, _) => DisplayStatus::Rejected,
    }
}

/// Display status of a progress report with raw status `raw` during `period`.
pub fn classify_progress_report(raw: &str, period: PeriodName) -> DisplayStatus {
    match ProgressReportStatus::parse(raw) {
        Some(status) => progress_report_display(status, period),
        None => DisplayStatus::Unknown,
    }
}

pub fn progress_report_display(status: ProgressReportStatus, period: PeriodName) -> DisplayStatus {
    match (status, period) {
        (ProgressReportStatus::Waiting, PeriodName::Voting) => DisplayStatus::Voting,
        (ProgressReportStatus::Waiting, _) => DisplayStatus::Pending,
        (ProgressReportStatus::Approved, _) => DisplayStatus::Approved,
        (ProgressReportStatus::Rejected, _) => DisplayStatus::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_depends_on_period() {
        assert_eq!(classify_proposal("_pending", PeriodName::Application), DisplayStatus::Pending);
        assert_eq!(classify_proposal("_pending", PeriodName::Voting), DisplayStatus::Voting);
        assert_eq!(classify_proposal("_pending", PeriodName::Transition), DisplayStatus::Pending);
    }

    #[test]
    fn settled_statuses_ignore_period() {
        for period in PeriodName::ALL {
            assert_eq!(classify_proposal("_active", period), DisplayStatus::Active);
            assert_eq!(classify_proposal("_paused", period), DisplayStatus::Paused);
            assert_eq!(classify_proposal("_completed", period), DisplayStatus::Completed);
            assert_eq!(classify_proposal("_disqualified", period), DisplayStatus::Disqualified);
            assert_eq!(classify_proposal("_rejected", period), DisplayStatus::Rejected);
        }
    }

    #[test]
    fn reports_vote_only_in_voting_period() {
        assert_eq!(classify_progress_report("_waiting", PeriodName::Voting), DisplayStatus::Voting);
        assert_eq!(
            classify_progress_report("_waiting", PeriodName::Application),
            DisplayStatus::Pending
        );
        assert_eq!(
            classify_progress_report("_approved", PeriodName::Voting),
            DisplayStatus::Approved
        );
        assert_eq!(
            classify_progress_report("_progress_report_rejected", PeriodName::Application),
            DisplayStatus::Rejected
        );
    }

    #[test]
    fn unknown_raw_status_is_hidden() {
        let status = classify_proposal("_migrated", PeriodName::Voting);
        assert_eq!(status, DisplayStatus::Unknown);
        assert!(!status.is_visible());
        assert_eq!(classify_progress_report("", PeriodName::Voting), DisplayStatus::Unknown);
    }
}
