//! Keyloop Core Library
//!
//! Input capture, timed playback and the file-based signaling protocol that
//! lets a separate hotkey process drive the recorder.
//!
//! # Example
//!
//! ```no_run
//! use keyloop_core::{
//!     Capturer, CoreResult, InputInjector, LoopController, PlaybackScheduler, Session,
//!     DEFAULT_LOOP_INTERVAL,
//! };
//!
//! use std::sync::Arc;
//!
//! async fn record_then_loop(injector: Arc<dyn InputInjector>) -> CoreResult<()> {
//!     let looper = LoopController::new(PlaybackScheduler::new(injector), DEFAULT_LOOP_INTERVAL);
//!     let mut session = Session::new(Arc::new(Capturer::new()), looper);
//!
//!     session.start_recording()?;
//!     // ... input hooks call `session.capturer().record(..)` ...
//!     session.stop_recording();
//!
//!     session.start_loop()?;
//!     // ... later ...
//!     session.end_loop().await;
//!     Ok(())
//! }
//! ```

mod capture;
mod error;
mod hotkey;
mod input;
mod keybind;
mod persist;
mod playback;
mod session;
mod signal;
mod storage;

pub use {
    capture::{Capturer, EventStore},
    error::{CoreError, Result as CoreResult},
    hotkey::{
        ChordMatcher, DEFAULT_CONFIG_CHECK_INTERVAL, HotkeyListener, KeyUpOutcome, KeybindWatcher,
        ListenerSignal, ReloadOutcome,
    },
    input::{Event, EventKind, Key, KeyParseError, MODIFIER_GUARD_SET, MouseButton, NamedKey, Sequence},
    keybind::{
        Action, ActionParseError, Chord, ChordError, DEFAULT_APP_NAME, KeybindFile, KeybindMap,
    },
    playback::{
        DEFAULT_LOOP_INTERVAL, DEFAULT_SLICE, InputInjector, KeyDirection, LoopController,
        LoopMode, LoopReport, ModifierGuard, PlaybackOutcome, PlaybackScheduler,
        sleep_until_sliced,
    },
    session::{Session, SessionState, StopOutcome},
    signal::{
        DEFAULT_POLL_INTERVAL, PAUSE_MARKER_FILE, PauseGate, TRIGGER_EXTENSION, TakeOutcome,
        TriggerChannel, TriggerPoller,
    },
    storage::{DEFAULT_SEQUENCE_NAME, JsonSequenceStore, SEQUENCE_EXTENSION, SequenceStore},
};

#[cfg(test)]
mod tests;
