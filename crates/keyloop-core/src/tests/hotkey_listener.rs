use crate::{Action, HotkeyListener, Key, KeybindMap, ListenerSignal, NamedKey, PauseGate, TriggerChannel};

use std::sync::Arc;

use tempfile::tempdir;
use tokio::sync::watch;

const SHIFT: Key = Key::Named(NamedKey::ShiftLeft);

fn press_chord(listener: &mut HotkeyListener, key: char) -> ListenerSignal {
    listener.on_key_down(SHIFT);
    let signal = listener.on_key_down(Key::char(key));
    listener.on_key_up(Key::char(key));
    listener.on_key_up(SHIFT);
    signal
}

/// WHAT: Pause suppresses chords; after exit the same chord fires
/// WHY: Hotkeys must not act while the user edits settings
#[test]
#[allow(clippy::unwrap_used)]
fn given_pause_entered_when_chord_pressed_then_no_trigger_until_exit() {
    // Given: A listener over a temp signal dir, pause entered
    let dir = tempdir().unwrap();
    let (_tx, rx) = watch::channel(Arc::new(KeybindMap::default()));
    let pause = PauseGate::new(dir.path());
    let triggers = TriggerChannel::new(dir.path());
    let mut listener = HotkeyListener::new(rx, pause.clone(), triggers.clone());
    pause.enter().unwrap();

    // When: play_task chord pressed while paused
    let paused_signal = press_chord(&mut listener, 's');

    // Then: No trigger
    assert_eq!(paused_signal, ListenerSignal::Continue);
    assert!(!triggers.is_pending(Action::PlayTask));

    // When: Pause exited and the chord pressed again
    pause.exit().unwrap();
    let signal = press_chord(&mut listener, 's');

    // Then: Trigger created
    assert_eq!(signal, ListenerSignal::Fired(Action::PlayTask));
    assert!(triggers.is_pending(Action::PlayTask));
}

/// WHAT: A reloaded map is used on the next key press
/// WHY: Rebinding takes effect without restarting the listener
#[test]
#[allow(clippy::unwrap_used)]
fn given_map_replaced_when_new_chord_pressed_then_new_binding_fires() {
    // Given: A listener on defaults
    let dir = tempdir().unwrap();
    let (tx, rx) = watch::channel(Arc::new(KeybindMap::default()));
    let mut listener =
        HotkeyListener::new(rx, PauseGate::new(dir.path()), TriggerChannel::new(dir.path()));

    // When: stop is rebound to shift_l + x and that chord is pressed
    let mut map = KeybindMap::default();
    map.set(
        Action::Stop,
        crate::Chord::new(SHIFT, Key::char('x')).unwrap(),
    );
    tx.send_replace(Arc::new(map));
    let signal = press_chord(&mut listener, 'x');

    // Then: stop fires
    assert_eq!(signal, ListenerSignal::Fired(Action::Stop));
}

/// WHAT: ctrl + esc release asks the listener to exit
/// WHY: Keyboard escape hatch for the hotkey process
#[test]
#[allow(clippy::unwrap_used)]
fn given_ctrl_held_when_esc_released_then_kill() {
    // Given: A listener with ctrl_r and esc down
    let dir = tempdir().unwrap();
    let (_tx, rx) = watch::channel(Arc::new(KeybindMap::default()));
    let mut listener =
        HotkeyListener::new(rx, PauseGate::new(dir.path()), TriggerChannel::new(dir.path()));
    listener.on_key_down(Key::Named(NamedKey::ControlRight));
    listener.on_key_down(Key::Named(NamedKey::Escape));

    // When: esc released
    let signal = listener.on_key_up(Key::Named(NamedKey::Escape));

    // Then: Kill
    assert_eq!(signal, ListenerSignal::Kill);
}
