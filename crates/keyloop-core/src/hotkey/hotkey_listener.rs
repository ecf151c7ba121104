use crate::{Action, ChordMatcher, Key, KeyUpOutcome, KeybindMap, PauseGate, TriggerChannel};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

/// What the hotkey process should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerSignal {
    /// Keep listening.
    Continue,
    /// A chord matched and its trigger file was written.
    Fired(Action),
    /// The kill chord was released; stop listening.
    Kill,
}

/// Hotkey-process side of the trigger channel.
///
/// Turns raw key events into trigger files. Bindings come from a watch channel
/// so a reload is picked up on the next key press.
#[derive(Debug)]
pub struct HotkeyListener {
    matcher: ChordMatcher,
    binds: watch::Receiver<Arc<KeybindMap>>,
    pause: PauseGate,
    triggers: TriggerChannel,
}

impl HotkeyListener {
    /// Listener writing to `triggers`, idle while `pause` is set.
    pub fn new(
        binds: watch::Receiver<Arc<KeybindMap>>,
        pause: PauseGate,
        triggers: TriggerChannel,
    ) -> Self {
        Self {
            matcher: ChordMatcher::new(),
            binds,
            pause,
            triggers,
        }
    }

    /// Handle a press.
    pub fn on_key_down(&mut self, key: Key) -> ListenerSignal {
        if self.pause.is_paused() {
            return ListenerSignal::Continue;
        }

        let binds = Arc::clone(&self.binds.borrow());
        let Some(action) = self.matcher.key_down(key, &binds) else {
            return ListenerSignal::Continue;
        };

        match self.triggers.fire(action) {
            Ok(()) => {
                info!(action = %action, chord = %binds.chord(action), "Hotkey fired");
                ListenerSignal::Fired(action)
            }
            Err(e) => {
                error!(action = %action, error = %e, "Failed to write trigger");
                ListenerSignal::Continue
            }
        }
    }

    /// Handle a release.
    pub fn on_key_up(&mut self, key: Key) -> ListenerSignal {
        if self.pause.is_paused() {
            return ListenerSignal::Continue;
        }

        match self.matcher.key_up(key) {
            KeyUpOutcome::KillChord => {
                info!("Kill chord released");
                ListenerSignal::Kill
            }
            KeyUpOutcome::Released => ListenerSignal::Continue,
        }
    }
}
