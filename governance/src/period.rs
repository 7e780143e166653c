//! Period transitions.
//!
//! When the current period runs out the contract waits for someone to call
//! `update_period`. A single call may only reach the Transition period, so the
//! resolver keeps calling, with a settle delay before each re-read, until the
//! contract reports Application or Voting or the attempt budget runs out.

use std::time::Duration;

use cps_chain::ChainClient;
use cps_types::{Period, PeriodName};

use crate::error::PeriodError;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Result of one resolver pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodOutcome {
    /// The period still had time left; nothing was submitted.
    Unchanged(Period),
    /// The contract moved from `from` into `to` after `attempts` calls.
    Advanced {
        from: PeriodName,
        to: Period,
        attempts: u32,
    },
}

impl PeriodOutcome {
    pub fn current(&self) -> Period {
        match self {
            Self::Unchanged(period) => *period,
            Self::Advanced { to, .. } => *to,
        }
    }
}

pub struct PeriodResolver<'a> {
    chain: &'a dyn ChainClient,
    settle_delay: Duration,
    max_attempts: u32,
}

impl<'a> PeriodResolver<'a> {
    pub fn new(chain: &'a dyn ChainClient) -> Self {
        Self {
            chain,
            settle_delay: DEFAULT_SETTLE_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// At least one `update_period` call is always allowed.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Read the period and advance it if it has run out.
    pub async fn resolve(&self) -> Result<PeriodOutcome, PeriodError> {
        let period = self.chain.period_check().await?;
        tracing::info!(
            period = %period.name,
            remaining_time = period.remaining_time,
            "period read"
        );
        if !period.is_due() {
            return Ok(PeriodOutcome::Unchanged(period));
        }
        self.advance(period).await
    }

    /// Drive `current`, which must be due, forward until it settles.
    ///
    /// A read counts as settled once it is neither Transition nor the period
    /// we started from still waiting on its own update.
    pub async fn advance(&self, current: Period) -> Result<PeriodOutcome, PeriodError> {
        let from = current.name;
        let mut last = current;
        for attempt in 1..=self.max_attempts {
            self.chain.update_period().await?;
            tokio::time::sleep(self.settle_delay).await;
            last = self.chain.period_check().await?;
            tracing::info!(attempt, period = %last.name, "period after update");

            let unprocessed = last.name == from && last.is_due();
            let settled = last.name != PeriodName::Transition && !unprocessed;
            if settled {
                return Ok(PeriodOutcome::Advanced {
                    from,
                    to: last,
                    attempts: attempt,
                });
            }
        }
        tracing::error!(attempts = self.max_attempts, period = %last.name, "period did not settle");
        Err(PeriodError::TransitionIncomplete {
            attempts: self.max_attempts,
            last: last.name,
        })
    }
}
