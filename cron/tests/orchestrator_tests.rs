//! Full job runs against the in-memory chain, store, webhook and clock.

use std::time::Duration;

use cps_chain::ProjectAmounts;
use cps_cron::{CronContext, CronError, RunReport, RunSettings};
use cps_notify::{EventType, ProposalMetadata};
use cps_nullables::{NullChain, NullClock, NullContentStore, NullWebhook};
use cps_types::{
    Period, PeriodName, ProgressReportStatus, Proposal, ProposalStatus, TokenAmount, VoteCounts,
};

const NOW: u64 = 1_700_000_000;

fn proposal(hash: &str, status: ProposalStatus) -> Proposal {
    Proposal {
        ipfs_hash: hash.into(),
        ipfs_key: None,
        project_title: format!("Project {hash}"),
        status,
        total_budget: TokenAmount::from_tokens(2_500),
        contributor_address: None,
        sponsor_address: None,
        sponsor_vote_reason: None,
        percentage_completed: 0,
        votes: VoteCounts {
            approve_voters: 7,
            reject_voters: 1,
            total_voters: 10,
            ..VoteCounts::default()
        },
    }
}

struct Harness {
    chain: NullChain,
    content: NullContentStore,
    sink: NullWebhook,
    clock: NullClock,
}

impl Harness {
    fn new() -> Self {
        let chain = NullChain::new();
        chain.set_remaining_funds(TokenAmount::from_tokens(100_000));
        chain.set_project_amounts(
            ProposalStatus::Pending,
            ProjectAmounts {
                count: 1,
                total_amount: TokenAmount::from_tokens(2_500),
            },
        );
        chain.set_progress_report_count(ProgressReportStatus::Waiting, 2);
        Self {
            chain,
            content: NullContentStore::new(),
            sink: NullWebhook::new(),
            clock: NullClock::new(NOW),
        }
    }

    fn ctx(&self) -> CronContext<'_> {
        CronContext::new(&self.chain, &self.content, &self.sink, &self.clock).with_settings(
            RunSettings {
                settle_delay: Duration::ZERO,
                ..RunSettings::default()
            },
        )
    }
}

#[tokio::test]
async fn open_period_is_idle_and_idempotent() {
    let h = Harness::new();
    h.chain.push_period(Period::new(PeriodName::Application, 600));

    for _ in 0..3 {
        let report = h.ctx().run_once().await.unwrap();
        assert_eq!(report, RunReport::Idle(Period::new(PeriodName::Application, 600)));
    }
    assert_eq!(h.chain.update_calls(), 0);
    assert!(h.sink.delivered().is_empty());
}

#[tokio::test]
async fn application_to_voting_through_transition() {
    let h = Harness::new();
    h.chain.push_period(Period::new(PeriodName::Application, 0));
    h.chain.push_period(Period::new(PeriodName::Transition, 0));
    h.chain.push_period(Period::new(PeriodName::Voting, 1_296_000));

    let report = h.ctx().run_once().await.unwrap();

    assert_eq!(
        report,
        RunReport::Advanced {
            from: PeriodName::Application,
            to: Period::new(PeriodName::Voting, 1_296_000),
            attempts: 2,
            events: vec![EventType::ApplicationPeriodStats],
        }
    );
    assert_eq!(h.chain.update_calls(), 2);
    let payload = h.sink.payload(EventType::ApplicationPeriodStats).unwrap();
    assert_eq!(payload["votingProposalsCount"], "1");
    assert_eq!(payload["votingProposalsBudget"], "2500.00");
    assert_eq!(payload["votingPRsCount"], "2");
}

#[tokio::test]
async fn voting_to_application_announces_results() {
    let h = Harness::new();
    h.chain.push_period(Period::new(PeriodName::Voting, 0));
    h.chain.push_period(Period::new(PeriodName::Application, 1_296_000));
    h.chain.set_proposals(
        ProposalStatus::Active,
        vec![proposal("QmWinner", ProposalStatus::Active)],
    );
    h.content.insert(
        "QmWinner",
        ProposalMetadata {
            team_name: Some("Winners".into()),
            ..ProposalMetadata::default()
        },
    );

    let report = h.ctx().run_once().await.unwrap();

    assert_eq!(
        report.events(),
        [
            EventType::VotingPeriodStats,
            EventType::ProposalStats,
            EventType::ProgressReportStats
        ]
    );
    assert_eq!(report.period().name, PeriodName::Application);
    let stats = h.sink.payload(EventType::ProposalStats).unwrap();
    assert_eq!(stats["approvedProposals"][0]["teamName"], "Winners");
    assert_eq!(stats["approvedProposals"][0]["approvingVotersPercentage"], "70.0");
}

#[tokio::test]
async fn bad_metadata_reference_stops_proposal_stats() {
    let h = Harness::new();
    h.chain.push_period(Period::new(PeriodName::Voting, 0));
    h.chain.push_period(Period::new(PeriodName::Application, 1_296_000));
    h.chain.set_proposals(
        ProposalStatus::Rejected,
        vec![proposal("../etc/passwd", ProposalStatus::Rejected)],
    );

    let err = h.ctx().run_once().await.unwrap_err();

    assert!(matches!(err, CronError::MetadataFetch { ref hash, .. } if hash == "../etc/passwd"));
    assert_eq!(h.sink.delivered_types(), vec![EventType::VotingPeriodStats]);
}

#[tokio::test]
async fn stuck_transition_is_incomplete() {
    let h = Harness::new();
    h.chain.push_period(Period::new(PeriodName::Voting, 0));
    h.chain.push_period(Period::new(PeriodName::Transition, 0));
    let ctx = h.ctx().with_settings(RunSettings {
        settle_delay: Duration::ZERO,
        max_transition_attempts: 3,
        ..RunSettings::default()
    });

    let err = ctx.run_once().await.unwrap_err();

    assert!(matches!(
        err,
        CronError::TransitionIncomplete {
            attempts: 3,
            last: PeriodName::Transition
        }
    ));
    assert_eq!(h.chain.update_calls(), 3);
    assert!(h.sink.delivered().is_empty());
}

#[tokio::test]
async fn failed_read_is_external() {
    let h = Harness::new();
    h.chain.fail_period_check("connection refused");

    let err = h.ctx().run_once().await.unwrap_err();

    assert!(matches!(err, CronError::ExternalRead(_)));
    assert_eq!(h.chain.update_calls(), 0);
}

#[tokio::test]
async fn webhook_failure_ends_the_run() {
    let h = Harness::new();
    h.chain.push_period(Period::new(PeriodName::Application, 0));
    h.chain.push_period(Period::new(PeriodName::Voting, 1_296_000));
    h.sink.fail_on(EventType::ApplicationPeriodStats);

    let err = h.ctx().run_once().await.unwrap_err();

    assert!(matches!(err, CronError::WebhookDelivery(_)));
}

#[tokio::test]
async fn announced_end_date_follows_the_clock() {
    let h = Harness::new();
    h.clock.advance(86_400);
    h.chain.push_period(Period::new(PeriodName::Application, 0));
    h.chain.push_period(Period::new(PeriodName::Voting, 1_296_000));

    h.ctx().run_once().await.unwrap();

    let payload = h.sink.payload(EventType::ApplicationPeriodStats).unwrap();
    let expected = (NOW + 86_400 + 15 * 86_400) * 1_000;
    assert_eq!(payload["periodEndsOn"], expected.to_string());
}
