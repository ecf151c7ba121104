mod pause_gate;
mod trigger_channel;
mod trigger_poller;

pub use {
    pause_gate::{PAUSE_MARKER_FILE, PauseGate},
    trigger_channel::{TRIGGER_EXTENSION, TakeOutcome, TriggerChannel},
    trigger_poller::{DEFAULT_POLL_INTERVAL, TriggerPoller},
};
