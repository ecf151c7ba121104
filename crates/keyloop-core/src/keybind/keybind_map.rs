use crate::{Action, Chord, Key, NamedKey};

use std::collections::BTreeMap;

/// A chord for every action.
///
/// There is no way to remove a binding, so lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindMap {
    binds: BTreeMap<Action, Chord>,
}

impl KeybindMap {
    /// Built-in chord for `action`.
    pub fn default_chord(action: Action) -> Chord {
        let secondary = match action {
            Action::StartRecord => 'r',
            Action::Stop => 'q',
            Action::PlayTask => 's',
            Action::EndTask => 'e',
        };
        Chord::from_parts(NamedKey::ShiftLeft, Key::char(secondary))
    }

    /// Chord bound to `action`.
    pub fn chord(&self, action: Action) -> Chord {
        self.binds
            .get(&action)
            .copied()
            .unwrap_or_else(|| Self::default_chord(action))
    }

    /// Rebind `action`, returning the chord it replaced.
    pub fn set(&mut self, action: Action, chord: Chord) -> Chord {
        let previous = self.chord(action);
        self.binds.insert(action, chord);
        previous
    }

    /// Bindings in action order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, Chord)> + '_ {
        Action::ALL.into_iter().map(|a| (a, self.chord(a)))
    }

    /// Actions whose chords collide with another action's chord.
    pub fn conflicts(&self) -> Vec<(Action, Action)> {
        let mut found = Vec::new();
        for (i, a) in Action::ALL.iter().enumerate() {
            for b in &Action::ALL[i + 1..] {
                if self.chord(*a) == self.chord(*b) {
                    found.push((*a, *b));
                }
            }
        }
        found
    }
}

impl Default for KeybindMap {
    fn default() -> Self {
        Self {
            binds: Action::ALL
                .into_iter()
                .map(|a| (a, Self::default_chord(a)))
                .collect(),
        }
    }
}
