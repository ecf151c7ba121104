//! Repeated playback on a background task.

use crate::{
    CoreError, CoreResult, PlaybackOutcome, PlaybackScheduler, Sequence, SessionState,
    playback::sleep_until_sliced,
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{task::JoinHandle, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span, instrument, warn};
use uuid::Uuid;

/// Wait between loop iterations when none is configured.
pub const DEFAULT_LOOP_INTERVAL: Duration = Duration::from_secs(5);

/// How many times a run plays its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Play once and finish.
    Once,
    /// Play, wait the loop interval, repeat until stopped.
    Repeat,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    /// Id used in this run's log lines.
    pub run_id: Uuid,
    /// Mode the run was started in.
    pub mode: LoopMode,
    /// Playbacks that ran to completion.
    pub iterations: u32,
    /// Whether the run ended because it was stopped.
    pub cancelled: bool,
}

struct ActiveRun {
    run_id: Uuid,
    mode: LoopMode,
    cancel: CancellationToken,
    handle: JoinHandle<LoopReport>,
}

/// Drives the playback scheduler on a cancellable background task.
pub struct LoopController {
    scheduler: PlaybackScheduler,
    interval: Duration,
    active: Option<ActiveRun>,
}

impl LoopController {
    /// Controller waiting `interval` between iterations.
    pub fn new(scheduler: PlaybackScheduler, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            active: None,
        }
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| !run.handle.is_finished())
    }

    /// Mode of the run in progress.
    pub fn mode(&self) -> Option<LoopMode> {
        self.active
            .as_ref()
            .filter(|run| !run.handle.is_finished())
            .map(|run| run.mode)
    }

    /// Start playing `sequence` in the background.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`CoreError::SessionBusy`] if a run is in progress,
    /// [`CoreError::EmptySequence`] if the sequence has no events.
    #[track_caller]
    #[instrument(skip(self, sequence), fields(event_count = sequence.len()))]
    pub fn start(&mut self, sequence: Arc<Sequence>, mode: LoopMode) -> CoreResult<Uuid> {
        if let Some(current) = self.mode() {
            return Err(CoreError::SessionBusy {
                state: SessionState::from(current),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if sequence.is_empty() {
            return Err(CoreError::EmptySequence {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // A `Once` run that finished on its own is still parked here.
        self.active = None;

        let run_id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let task = run_loop(
            self.scheduler.clone(),
            sequence,
            self.interval,
            mode,
            cancel.clone(),
            run_id,
        )
        .instrument(info_span!("playback_run", run_id = %run_id, ?mode));
        let handle = tokio::spawn(task);

        info!(run_id = %run_id, ?mode, interval_ms = self.interval.as_millis(), "Playback run started");

        self.active = Some(ActiveRun {
            run_id,
            mode,
            cancel,
            handle,
        });

        Ok(run_id)
    }

    /// Cancel the current run and wait for it to unwind.
    ///
    /// When this returns no further iteration will begin. The in-flight
    /// playback notices the cancellation within one scheduler slice. Returns
    /// `None` if nothing was running.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> Option<LoopReport> {
        let run = self.active.take()?;
        run.cancel.cancel();

        match run.handle.await {
            Ok(report) => {
                info!(
                    run_id = %report.run_id,
                    iterations = report.iterations,
                    cancelled = report.cancelled,
                    "Playback run stopped"
                );
                Some(report)
            }
            Err(e) => {
                error!(run_id = %run.run_id, error = ?e, "Playback task failed");
                None
            }
        }
    }
}

impl Drop for LoopController {
    fn drop(&mut self) {
        if let Some(run) = self.active.take() {
            run.cancel.cancel();
        }
    }
}

async fn run_loop(
    scheduler: PlaybackScheduler,
    sequence: Arc<Sequence>,
    interval: Duration,
    mode: LoopMode,
    cancel: CancellationToken,
    run_id: Uuid,
) -> LoopReport {
    let mut report = LoopReport {
        run_id,
        mode,
        iterations: 0,
        cancelled: false,
    };

    loop {
        match scheduler.play(&sequence, &cancel).await {
            Ok(PlaybackOutcome::Completed { .. }) => report.iterations += 1,
            Ok(PlaybackOutcome::Cancelled { .. }) => {
                report.cancelled = true;
                break;
            }
            Err(e) => {
                warn!(error = ?e, "Playback refused, ending run");
                break;
            }
        }

        if mode == LoopMode::Once {
            break;
        }

        info!(
            iteration = report.iterations,
            wait_ms = interval.as_millis(),
            "Waiting before next iteration"
        );

        if !sleep_until_sliced(Instant::now() + interval, scheduler.slice(), &cancel).await {
            report.cancelled = true;
            break;
        }
    }

    report
}
