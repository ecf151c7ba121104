use crate::{Action, Key, KeybindMap, NamedKey};

use std::collections::HashSet;

/// What a key release means to the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUpOutcome {
    /// Ordinary release.
    Released,
    /// Escape released while a control key is held: the listener should exit.
    KillChord,
}

/// Tracks held keys and reports completed chords.
///
/// A chord completes when its secondary key goes down while its modifier is
/// held. The held set is cleared after every match, so the modifier has to be
/// pressed again before the next chord.
#[derive(Debug, Default)]
pub struct ChordMatcher {
    held: HashSet<Key>,
}

impl ChordMatcher {
    /// Matcher with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns the first action, in action order, whose chord
    /// is now complete.
    pub fn key_down(&mut self, key: Key, binds: &KeybindMap) -> Option<Action> {
        self.held.insert(key);

        let action = binds.iter().find_map(|(action, chord)| {
            (chord.key() == key && self.held.contains(&chord.modifier())).then_some(action)
        })?;

        self.held.clear();
        Some(action)
    }

    /// Record a release.
    pub fn key_up(&mut self, key: Key) -> KeyUpOutcome {
        self.held.remove(&key);

        if key == Key::Named(NamedKey::Escape) && self.held.iter().any(|k| k.is_control()) {
            KeyUpOutcome::KillChord
        } else {
            KeyUpOutcome::Released
        }
    }

    /// Whether `key` is currently held.
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
