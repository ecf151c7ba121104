mod chord_matcher;
mod hotkey_listener;
mod keybind_watcher;

pub use {
    chord_matcher::{ChordMatcher, KeyUpOutcome},
    hotkey_listener::{HotkeyListener, ListenerSignal},
    keybind_watcher::{DEFAULT_CONFIG_CHECK_INTERVAL, KeybindWatcher, ReloadOutcome},
};
