//! Period transition protocol against the in-memory chain.

use std::time::Duration;

use cps_chain::ChainError;
use cps_governance::{PeriodError, PeriodOutcome, PeriodResolver};
use cps_nullables::NullChain;
use cps_types::{Period, PeriodName};

fn resolver(chain: &NullChain) -> PeriodResolver<'_> {
    PeriodResolver::new(chain).with_settle_delay(Duration::ZERO)
}

#[tokio::test]
async fn open_period_is_a_no_op() {
    let chain = NullChain::new();
    chain.push_period(Period::new(PeriodName::Voting, 3600));

    for _ in 0..2 {
        let outcome = resolver(&chain).resolve().await.unwrap();
        assert_eq!(outcome, PeriodOutcome::Unchanged(Period::new(PeriodName::Voting, 3600)));
    }
    assert_eq!(chain.update_calls(), 0);
}

#[tokio::test]
async fn walks_through_transition() {
    let chain = NullChain::new();
    chain.push_period(Period::new(PeriodName::Application, 0));
    chain.push_period(Period::new(PeriodName::Transition, 0));
    chain.push_period(Period::new(PeriodName::Voting, 86_400));

    let outcome = resolver(&chain).resolve().await.unwrap();
    assert_eq!(
        outcome,
        PeriodOutcome::Advanced {
            from: PeriodName::Application,
            to: Period::new(PeriodName::Voting, 86_400),
            attempts: 2,
        }
    );
    assert_eq!(chain.update_calls(), 2);
    assert_eq!(outcome.current().name, PeriodName::Voting);
}

#[tokio::test]
async fn stuck_in_transition_is_an_error() {
    let chain = NullChain::new();
    chain.push_period(Period::new(PeriodName::Voting, 0));
    chain.push_period(Period::new(PeriodName::Transition, 0));

    let err = resolver(&chain).with_max_attempts(3).resolve().await.unwrap_err();
    assert!(matches!(
        err,
        PeriodError::TransitionIncomplete { attempts: 3, last: PeriodName::Transition }
    ));
    assert_eq!(chain.update_calls(), 3);
}

#[tokio::test]
async fn unprocessed_update_is_retried() {
    let chain = NullChain::new();
    chain.push_period(Period::new(PeriodName::Voting, 0));
    chain.push_period(Period::new(PeriodName::Voting, 0));
    chain.push_period(Period::new(PeriodName::Application, 1_000));

    let outcome = resolver(&chain).resolve().await.unwrap();
    assert!(matches!(outcome, PeriodOutcome::Advanced { attempts: 2, .. }));
}

#[tokio::test]
async fn failed_update_propagates() {
    let chain = NullChain::new();
    chain.push_period(Period::new(PeriodName::Application, 0));
    chain.fail_update_period("relay offline");

    let err = resolver(&chain).resolve().await.unwrap_err();
    assert!(matches!(err, PeriodError::Chain(ChainError::Relay { .. })));
}

#[tokio::test]
async fn failed_read_propagates() {
    let chain = NullChain::new();
    chain.fail_period_check("node down");

    let err = resolver(&chain).resolve().await.unwrap_err();
    assert!(matches!(err, PeriodError::Chain(ChainError::Request { .. })));
    assert_eq!(chain.update_calls(), 0);
}
