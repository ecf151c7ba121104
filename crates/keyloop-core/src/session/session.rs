//! The recorder/player session context.
//!
//! One `Session` owns everything that used to be ambient state in a
//! recorder: the capturer's armed flag, the active sequence and the playback
//! run. Callers hold it behind whatever lock suits them and drive it with
//! the operations below.

use crate::{
    Capturer, CoreError, CoreResult, LoopController, LoopMode, LoopReport, Sequence, SessionState,
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// What [`Session::stop`] stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum StopOutcome {
    /// Nothing was running.
    Idle,
    /// A recording was finalized.
    Recording(Arc<Sequence>),
    /// A playback run was stopped.
    Playback(Option<LoopReport>),
}

/// Capture and playback state for one user.
pub struct Session {
    capturer: Arc<Capturer>,
    looper: LoopController,
    sequence: Option<Arc<Sequence>>,
}

impl Session {
    /// Session around a capturer shared with the input hooks.
    pub fn new(capturer: Arc<Capturer>, looper: LoopController) -> Self {
        Self {
            capturer,
            looper,
            sequence: None,
        }
    }

    /// The capturer the input hooks should feed.
    pub fn capturer(&self) -> &Arc<Capturer> {
        &self.capturer
    }

    /// Current state, derived from the capturer and the loop controller.
    pub fn state(&self) -> SessionState {
        if self.capturer.is_armed() {
            SessionState::Recording
        } else {
            self.looper
                .mode()
                .map(SessionState::from)
                .unwrap_or(SessionState::Idle)
        }
    }

    /// The sequence playback would use.
    pub fn sequence(&self) -> Option<&Arc<Sequence>> {
        self.sequence.as_ref()
    }

    /// Replace the active sequence (e.g. after loading one from storage).
    ///
    /// A playback run already in progress keeps the sequence it started with.
    pub fn set_sequence(&mut self, sequence: Sequence) {
        info!(event_count = sequence.len(), "Active sequence replaced");
        self.sequence = Some(Arc::new(sequence));
    }

    /// Idle → Recording.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start_recording(&mut self) -> CoreResult<Uuid> {
        self.require_idle()?;
        Ok(self.capturer.arm())
    }

    /// Recording → Idle, returning the captured sequence.
    ///
    /// A non-empty recording becomes the active sequence; an empty one
    /// leaves the previous sequence in place. Returns `None` when not
    /// recording.
    #[instrument(skip(self))]
    pub fn stop_recording(&mut self) -> Option<Arc<Sequence>> {
        if !self.capturer.is_armed() {
            return None;
        }

        let sequence = Arc::new(self.capturer.disarm());
        if sequence.is_empty() {
            info!("Recording stopped (no events)");
        } else {
            info!(event_count = sequence.len(), "Recording stopped");
            self.sequence = Some(Arc::clone(&sequence));
        }

        Some(sequence)
    }

    /// Stop whatever is running.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> StopOutcome {
        match self.state() {
            SessionState::Recording => self
                .stop_recording()
                .map(StopOutcome::Recording)
                .unwrap_or(StopOutcome::Idle),
            SessionState::Playing | SessionState::Looping => {
                StopOutcome::Playback(self.looper.stop().await)
            }
            SessionState::Idle => StopOutcome::Idle,
        }
    }

    /// Idle → Looping with the active sequence.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start_loop(&mut self) -> CoreResult<Uuid> {
        self.start_run(LoopMode::Repeat)
    }

    /// Idle → Playing with the active sequence, once.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn play_once(&mut self) -> CoreResult<Uuid> {
        self.start_run(LoopMode::Once)
    }

    /// Playing/Looping → Idle. Returns `None` if nothing was playing.
    #[instrument(skip(self))]
    pub async fn end_loop(&mut self) -> Option<LoopReport> {
        self.looper.stop().await
    }

    #[track_caller]
    fn start_run(&mut self, mode: LoopMode) -> CoreResult<Uuid> {
        self.require_idle()?;

        let Some(sequence) = self.sequence.as_ref().filter(|s| !s.is_empty()) else {
            warn!("No events recorded, nothing to play");
            return Err(CoreError::EmptySequence {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.looper.start(Arc::clone(sequence), mode)
    }

    #[track_caller]
    fn require_idle(&self) -> CoreResult<()> {
        match self.state() {
            SessionState::Idle => Ok(()),
            state => Err(CoreError::SessionBusy {
                state,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
