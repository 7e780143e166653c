//! Which actions the dashboard may offer for a given state.
//!
//! Every rule here reads only its arguments; the caller passes the current
//! period and what it knows about the viewer.

use cps_types::{Period, PeriodName};
use serde::Serialize;

use crate::status::DisplayStatus;

/// What the dashboard knows about the connected wallet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewer {
    /// The wallet is a PRep.
    pub is_prep: bool,
    /// The PRep is registered as a CPS voter.
    pub is_registered: bool,
    /// The PRep owes a penalty for missed votes.
    pub has_penalty: bool,
    /// The wallet was asked to sponsor this proposal.
    pub is_requested_sponsor: bool,
    /// The wallet already voted on this target.
    pub has_voted: bool,
    /// The contract allows this wallet to change its vote.
    pub change_vote_enabled: bool,
}

impl Viewer {
    fn can_vote(&self) -> bool {
        self.is_prep && self.is_registered && !self.has_penalty
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProposalActions {
    pub sponsor_decision: bool,
    pub vote: bool,
    pub change_vote: bool,
    pub view_progress_reports: bool,
    pub view_vote_results: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReportActions {
    pub vote: bool,
    pub change_vote: bool,
    /// The report carries a project term revision with its own vote.
    pub vote_budget_change: bool,
    pub view_vote_results: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrepActions {
    pub register: bool,
    pub unregister: bool,
}

/// Voting is open and the viewer either has not voted or may change the vote.
/// Returns `(vote, change_vote)`.
fn voting_rights(status: DisplayStatus, period: &Period, viewer: &Viewer) -> (bool, bool) {
    let open = status == DisplayStatus::Voting && period.is_open(PeriodName::Voting);
    if !open || !viewer.can_vote() {
        return (false, false);
    }
    if !viewer.has_voted {
        (true, false)
    } else if viewer.change_vote_enabled {
        (true, true)
    } else {
        (false, false)
    }
}

pub fn proposal_actions(
    status: DisplayStatus,
    period: &Period,
    viewer: &Viewer,
) -> ProposalActions {
    let (vote, change_vote) = voting_rights(status, period, viewer);
    ProposalActions {
        sponsor_decision: viewer.is_requested_sponsor
            && status == DisplayStatus::Pending
            && period.is_open(PeriodName::Application),
        vote,
        change_vote,
        view_progress_reports: matches!(
            status,
            DisplayStatus::Active | DisplayStatus::Completed | DisplayStatus::Paused
        ),
        view_vote_results: matches!(
            status,
            DisplayStatus::Voting
                | DisplayStatus::Active
                | DisplayStatus::Completed
                | DisplayStatus::Paused
                | DisplayStatus::Disqualified
                | DisplayStatus::Rejected
        ),
    }
}

pub fn progress_report_actions(
    status: DisplayStatus,
    period: &Period,
    viewer: &Viewer,
    has_term_revision: bool,
) -> ReportActions {
    let (vote, change_vote) = voting_rights(status, period, viewer);
    ReportActions {
        vote,
        change_vote,
        vote_budget_change: vote && has_term_revision,
        view_vote_results: matches!(
            status,
            DisplayStatus::Voting | DisplayStatus::Approved | DisplayStatus::Rejected
        ),
    }
}

/// Registration changes are only accepted while the Application period runs.
pub fn prep_actions(period: &Period, viewer: &Viewer) -> PrepActions {
    let open = viewer.is_prep && !viewer.has_penalty && period.is_open(PeriodName::Application);
    PrepActions {
        register: open && !viewer.is_registered,
        unregister: open && viewer.is_registered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter() -> Viewer {
        Viewer {
            is_prep: true,
            is_registered: true,
            ..Default::default()
        }
    }

    #[test]
    fn sponsor_decision_needs_open_application_period() {
        let viewer = Viewer {
            is_requested_sponsor: true,
            ..voter()
        };
        let open = Period::new(PeriodName::Application, 100);
        let expired = Period::new(PeriodName::Application, 0);
        let voting = Period::new(PeriodName::Voting, 100);

        assert!(proposal_actions(DisplayStatus::Pending, &open, &viewer).sponsor_decision);
        assert!(!proposal_actions(DisplayStatus::Pending, &expired, &viewer).sponsor_decision);
        assert!(!proposal_actions(DisplayStatus::Pending, &voting, &viewer).sponsor_decision);
        assert!(!proposal_actions(DisplayStatus::Active, &open, &viewer).sponsor_decision);
        assert!(!proposal_actions(DisplayStatus::Pending, &open, &voter()).sponsor_decision);
    }

    #[test]
    fn one_vote_unless_change_enabled() {
        let period = Period::new(PeriodName::Voting, 100);
        let fresh = proposal_actions(DisplayStatus::Voting, &period, &voter());
        assert!(fresh.vote && !fresh.change_vote);

        let voted = Viewer {
            has_voted: true,
            ..voter()
        };
        assert!(!proposal_actions(DisplayStatus::Voting, &period, &voted).vote);

        let may_change = Viewer {
            change_vote_enabled: true,
            ..voted
        };
        let actions = proposal_actions(DisplayStatus::Voting, &period, &may_change);
        assert!(actions.vote && actions.change_vote);
    }

    #[test]
    fn no_vote_when_time_is_up() {
        let period = Period::new(PeriodName::Voting, 0);
        assert!(!proposal_actions(DisplayStatus::Voting, &period, &voter()).vote);
    }

    #[test]
    fn budget_change_vote_follows_report_vote() {
        let period = Period::new(PeriodName::Voting, 100);
        let actions = progress_report_actions(DisplayStatus::Voting, &period, &voter(), true);
        assert!(actions.vote && actions.vote_budget_change);
        let actions = progress_report_actions(DisplayStatus::Voting, &period, &voter(), false);
        assert!(actions.vote && !actions.vote_budget_change);
        let actions = progress_report_actions(DisplayStatus::Approved, &period, &voter(), true);
        assert!(!actions.vote && actions.view_vote_results);
    }

    #[test]
    fn visibility_by_status() {
        let period = Period::new(PeriodName::Application, 100);
        let actions = proposal_actions(DisplayStatus::Paused, &period, &Viewer::default());
        assert!(actions.view_progress_reports && actions.view_vote_results);
        let actions = proposal_actions(DisplayStatus::Pending, &period, &Viewer::default());
        assert!(!actions.view_progress_reports && !actions.view_vote_results);
    }

    #[test]
    fn prep_registration_window() {
        let open = Period::new(PeriodName::Application, 10);
        let prep = Viewer {
            is_prep: true,
            ..Default::default()
        };
        assert_eq!(
            prep_actions(&open, &prep),
            PrepActions {
                register: true,
                unregister: false
            }
        );
        assert_eq!(
            prep_actions(&open, &voter()),
            PrepActions {
                register: false,
                unregister: true
            }
        );

        let penalised = Viewer {
            has_penalty: true,
            ..voter()
        };
        assert_eq!(prep_actions(&open, &penalised), PrepActions::default());
        let voting = Period::new(PeriodName::Voting, 10);
        assert_eq!(prep_actions(&voting, &voter()), PrepActions::default());
    }
}
