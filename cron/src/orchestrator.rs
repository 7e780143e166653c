//! One invocation of the scheduled job.
//!
//! ```text
//! period_check ──not due──▶ Idle
//!      │
//!      ▼ due
//! PeriodResolver::advance ──▶ settled period
//!      │
//!      ├─ Application ▶ votingPeriodStats, proposalStats, prStats
//!      └─ Voting      ▶ applicationPeriodStats
//! ```

use std::time::Duration;

use cps_chain::ChainClient;
use cps_governance::period::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SETTLE_DELAY};
use cps_governance::{PeriodOutcome, PeriodResolver};
use cps_notify::{ContentStore, Dispatcher, EventType, WebhookSink, DEFAULT_PERIOD_ENDING_DAYS};
use cps_types::{Clock, Period, PeriodName};
use tracing::Instrument;

use crate::config::CronConfig;
use crate::error::CronError;

/// Tunables for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSettings {
    pub settle_delay: Duration,
    pub max_transition_attempts: u32,
    pub period_ending_days: u64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            max_transition_attempts: DEFAULT_MAX_ATTEMPTS,
            period_ending_days: DEFAULT_PERIOD_ENDING_DAYS,
        }
    }
}

impl From<&CronConfig> for RunSettings {
    fn from(config: &CronConfig) -> Self {
        Self {
            settle_delay: config.settle_delay(),
            max_transition_attempts: config.max_transition_attempts,
            period_ending_days: config.period_ending_days,
        }
    }
}

/// What a run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunReport {
    /// The period still had time left.
    Idle(Period),
    /// The contract moved on and the closed period was announced.
    Advanced {
        from: PeriodName,
        to: Period,
        attempts: u32,
        events: Vec<EventType>,
    },
}

impl RunReport {
    pub fn period(&self) -> Period {
        match self {
            Self::Idle(period) => *period,
            Self::Advanced { to, .. } => *to,
        }
    }

    pub fn events(&self) -> &[EventType] {
        match self {
            Self::Idle(_) => &[],
            Self::Advanced { events, .. } => events,
        }
    }
}

/// Everything a run talks to, passed in by the caller.
pub struct CronContext<'a> {
    chain: &'a dyn ChainClient,
    content: &'a dyn ContentStore,
    sink: &'a dyn WebhookSink,
    clock: &'a dyn Clock,
    settings: RunSettings,
}

impl<'a> CronContext<'a> {
    pub fn new(
        chain: &'a dyn ChainClient,
        content: &'a dyn ContentStore,
        sink: &'a dyn WebhookSink,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            chain,
            content,
            sink,
            clock,
            settings: RunSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RunSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> RunSettings {
        self.settings
    }

    /// Run the job once.
    pub async fn run_once(&self) -> Result<RunReport, CronError> {
        let span = tracing::info_span!("cron_run");
        async {
            let report = self.run_inner().await;
            match &report {
                Ok(RunReport::Idle(period)) => {
                    tracing::info!(
                        period = %period.name,
                        remaining_time = period.remaining_time,
                        "period open, nothing to do"
                    );
                }
                Ok(RunReport::Advanced { from, to, events, .. }) => {
                    tracing::info!(
                        from = %from,
                        to = %to.name,
                        events = events.len(),
                        "period advanced"
                    );
                }
                Err(e) => tracing::error!(error = %e, "run failed"),
            }
            report
        }
        .instrument(span)
        .await
    }

    async fn run_inner(&self) -> Result<RunReport, CronError> {
        let resolver = PeriodResolver::new(self.chain)
            .with_settle_delay(self.settings.settle_delay)
            .with_max_attempts(self.settings.max_transition_attempts);

        let (from, to, attempts) = match resolver.resolve().await? {
            PeriodOutcome::Unchanged(period) => return Ok(RunReport::Idle(period)),
            PeriodOutcome::Advanced { from, to, attempts } => (from, to, attempts),
        };

        let dispatcher = Dispatcher::new(self.chain, self.content, self.sink)
            .with_period_ending_days(self.settings.period_ending_days);
        let now = self.clock.now();
        let events = match to.name {
            PeriodName::Application => dispatcher.announce_application_period(now).await?,
            PeriodName::Voting => dispatcher.announce_voting_period(now).await?,
            PeriodName::Transition => Vec::new(),
        };

        Ok(RunReport::Advanced {
            from,
            to,
            attempts,
            events,
        })
    }
}
