use crate::{Action, PauseGate, TakeOutcome, TriggerChannel};

use std::{fmt::Debug, time::Duration};

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Default time between two scans for trigger files.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main-process side of the trigger channel.
#[derive(Debug, Clone)]
pub struct TriggerPoller {
    triggers: TriggerChannel,
    pause: PauseGate,
    interval: Duration,
}

impl TriggerPoller {
    /// Poller scanning `triggers` every `interval`, idle while `pause` is set.
    pub fn new(triggers: TriggerChannel, pause: PauseGate, interval: Duration) -> Self {
        Self {
            triggers,
            pause,
            interval,
        }
    }

    /// One scan: consume every pending trigger and return the actions to run.
    ///
    /// While paused nothing is consumed; pending triggers stay on disk.
    pub fn poll_once(&self) -> Vec<Action> {
        if self.pause.is_paused() {
            return Vec::new();
        }

        let mut due = Vec::new();
        for action in Action::ALL {
            match self.triggers.take(action) {
                TakeOutcome::Taken => {
                    info!(action = %action, "Trigger received");
                    due.push(action);
                }
                TakeOutcome::Raced => {
                    debug!(action = %action, "Trigger consumed elsewhere, skipping");
                }
                TakeOutcome::Expired => {
                    warn!(action = %action, "Stale trigger discarded");
                }
                TakeOutcome::Absent => {}
            }
        }
        due
    }

    /// Scan on every tick until `cancel` fires, calling `handler` per action.
    ///
    /// A failing handler is logged and does not affect other actions or later
    /// ticks.
    pub async fn run<F, E>(self, cancel: CancellationToken, mut handler: F)
    where
        F: FnMut(Action) -> Result<(), E>,
        E: Debug,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            dir = ?self.triggers.dir(),
            interval_ms = self.interval.as_millis(),
            "Trigger poller started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Trigger poller shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    for action in self.poll_once() {
                        if let Err(e) = handler(action) {
                            error!(action = %action, error = ?e, "Trigger handler failed");
                        }
                    }
                }
            }
        }
    }
}
