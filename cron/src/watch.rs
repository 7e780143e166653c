//! The `watch` command: run the job on a fixed interval until SIGINT/SIGTERM.
//!
//! Shutdown is checked between runs only. A run that has already started
//! (possibly mid-transition, waiting out the settle delay) completes and its
//! webhooks go out before the loop stops.

use std::time::Duration;

use tokio::signal;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use crate::orchestrator::CronContext;

/// Broadcasts the stop request to the watch loop.
pub struct ShutdownController {
    tx: broadcast::Sender<()>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(());
    }

    /// Resolve on the first SIGINT or SIGTERM and request shutdown.
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "SIGTERM handler unavailable");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = signal::ctrl_c() => tracing::info!("received SIGINT, stopping watch loop"),
            _ = terminate => tracing::info!("received SIGTERM, stopping watch loop"),
        }
        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the job every `interval` until `shutdown` fires. The first run starts
/// immediately. A failed run is logged and the next tick starts over.
/// Returns the number of runs started.
pub async fn run_every(
    ctx: &CronContext<'_>,
    interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> u64 {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut runs = 0;
    loop {
        tokio::select! {
            biased;
            _ = shutdown.recv() => break,
            _ = ticker.tick() => {
                runs += 1;
                // Errors are already logged inside the run's span.
                let _ = ctx.run_once().await;
            }
        }
    }
    tracing::info!(runs, "watch loop stopped");
    runs
}
