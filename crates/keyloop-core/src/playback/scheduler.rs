//! Real-time replay of a recorded sequence.
//!
//! Every event fires at its original offset from the first event. Waits are
//! cut into slices raced against a cancellation token, so a stop request is
//! honoured within one slice no matter how long the gap between two events.

use crate::{
    CoreError, CoreResult, EventKind, InputInjector, KeyDirection, ModifierGuard, Sequence,
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Upper bound on a single uninterrupted wait.
pub const DEFAULT_SLICE: Duration = Duration::from_millis(100);

const MIN_SLICE: Duration = Duration::from_millis(1);

/// How a playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every event was dispatched.
    Completed {
        /// Events dispatched.
        events: usize,
    },
    /// The cancellation token fired before the end.
    Cancelled {
        /// Events dispatched before cancellation.
        events: usize,
    },
}

/// Replays sequences against an [`InputInjector`].
#[derive(Clone)]
pub struct PlaybackScheduler {
    injector: Arc<dyn InputInjector>,
    slice: Duration,
}

impl PlaybackScheduler {
    /// Scheduler using [`DEFAULT_SLICE`].
    pub fn new(injector: Arc<dyn InputInjector>) -> Self {
        Self {
            injector,
            slice: DEFAULT_SLICE,
        }
    }

    /// Override the wait slice (clamped to at least 1 ms).
    pub fn with_slice(mut self, slice: Duration) -> Self {
        self.slice = slice.max(MIN_SLICE);
        self
    }

    /// The wait slice in use.
    pub fn slice(&self) -> Duration {
        self.slice
    }

    /// Replay `sequence` until it ends or `cancel` fires.
    ///
    /// Guarded modifiers are released on every exit path.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptySequence`] without dispatching anything if
    /// the sequence has no events.
    #[instrument(skip(self, sequence, cancel), fields(event_count = sequence.len()))]
    pub async fn play(
        &self,
        sequence: &Sequence,
        cancel: &CancellationToken,
    ) -> CoreResult<PlaybackOutcome> {
        if sequence.is_empty() {
            return Err(CoreError::EmptySequence {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let _guard = ModifierGuard::new(Arc::clone(&self.injector));
        let start = Instant::now();
        let mut dispatched = 0;

        for (offset, event) in sequence.offsets() {
            if !sleep_until_sliced(start + offset, self.slice, cancel).await {
                info!(dispatched, "Playback cancelled");
                return Ok(PlaybackOutcome::Cancelled { events: dispatched });
            }

            if let Err(e) = self.dispatch(&event.kind) {
                warn!(error = ?e, event = ?event.kind, "Failed to inject event, continuing");
            }
            dispatched += 1;
        }

        debug!(
            dispatched,
            elapsed_ms = start.elapsed().as_millis(),
            "Playback complete"
        );

        Ok(PlaybackOutcome::Completed { events: dispatched })
    }

    fn dispatch(&self, kind: &EventKind) -> CoreResult<()> {
        match *kind {
            EventKind::Move { x, y } => self.injector.move_to(x, y),
            EventKind::Click { x, y, button } => {
                self.injector.move_to(x, y)?;
                self.injector.click(button)
            }
            EventKind::KeyDown { key } => self.injector.key(key, KeyDirection::Press),
            EventKind::KeyUp { key } => self.injector.key(key, KeyDirection::Release),
        }
    }
}

/// Sleep until `deadline`, at most `slice` at a time, racing `cancel`.
///
/// Returns `true` when the deadline was reached and `false` when cancelled.
/// Cancellation before the call returns `false` immediately.
pub async fn sleep_until_sliced(
    deadline: Instant,
    slice: Duration,
    cancel: &CancellationToken,
) -> bool {
    let slice = slice.max(MIN_SLICE);
    loop {
        if cancel.is_cancelled() {
            return false;
        }

        let now = Instant::now();
        if now >= deadline {
            return true;
        }

        let step_end = deadline.min(now + slice);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return false,
            _ = tokio::time::sleep_until(step_end) => {}
        }
    }
}
