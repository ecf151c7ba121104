use crate::{Key, NamedKey};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A modifier held while a secondary key goes down.
///
/// Stored on disk as a two-element array: `["shift_l", "r"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Key, Key)", into = "(Key, Key)")]
pub struct Chord {
    modifier: NamedKey,
    key: Key,
}

/// A chord whose parts do not form a valid binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// Modifiers must be named keys, not characters.
    #[error("Modifier must be a named key, got '{0}'")]
    CharacterModifier(Key),
    /// Pressing the modifier itself would complete the chord.
    #[error("Modifier and key are both '{0}'")]
    SameKey(Key),
}

impl Chord {
    /// Validate and build a chord.
    pub fn new(modifier: Key, key: Key) -> Result<Self, ChordError> {
        let Some(named) = modifier.named() else {
            return Err(ChordError::CharacterModifier(modifier));
        };
        if modifier == key {
            return Err(ChordError::SameKey(key));
        }
        Ok(Self {
            modifier: named,
            key,
        })
    }

    /// Chord from a named modifier and a key known to differ from it.
    pub(crate) fn from_parts(modifier: NamedKey, key: Key) -> Self {
        Self { modifier, key }
    }

    /// The key that must be held.
    pub fn modifier(&self) -> Key {
        Key::Named(self.modifier)
    }

    /// The key whose press completes the chord.
    pub fn key(&self) -> Key {
        self.key
    }
}

impl TryFrom<(Key, Key)> for Chord {
    type Error = ChordError;

    fn try_from((modifier, key): (Key, Key)) -> Result<Self, Self::Error> {
        Chord::new(modifier, key)
    }
}

impl From<Chord> for (Key, Key) {
    fn from(chord: Chord) -> Self {
        (chord.modifier(), chord.key)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.modifier(), self.key)
    }
}
