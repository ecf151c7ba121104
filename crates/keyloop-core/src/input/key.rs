//! Keyboard key identifiers shared by capture, playback and keybinds.
//!
//! Keys have a stable textual form (`shift_l`, `f5`, `esc`, `a`, ...) used in
//! the keybind file and in persisted sequences.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Keys with a name rather than a printable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NamedKey {
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    MetaLeft,
    MetaRight,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Enter,
    Space,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    CapsLock,
}

impl NamedKey {
    /// Every named key, in declaration order.
    pub const ALL: [NamedKey; 36] = [
        NamedKey::ShiftLeft,
        NamedKey::ShiftRight,
        NamedKey::ControlLeft,
        NamedKey::ControlRight,
        NamedKey::AltLeft,
        NamedKey::AltRight,
        NamedKey::MetaLeft,
        NamedKey::MetaRight,
        NamedKey::F1,
        NamedKey::F2,
        NamedKey::F3,
        NamedKey::F4,
        NamedKey::F5,
        NamedKey::F6,
        NamedKey::F7,
        NamedKey::F8,
        NamedKey::F9,
        NamedKey::F10,
        NamedKey::F11,
        NamedKey::F12,
        NamedKey::Enter,
        NamedKey::Space,
        NamedKey::Escape,
        NamedKey::Tab,
        NamedKey::Backspace,
        NamedKey::Delete,
        NamedKey::Insert,
        NamedKey::Up,
        NamedKey::Down,
        NamedKey::Left,
        NamedKey::Right,
        NamedKey::Home,
        NamedKey::End,
        NamedKey::PageUp,
        NamedKey::PageDown,
        NamedKey::CapsLock,
    ];

    /// Canonical textual name.
    pub fn name(self) -> &'static str {
        match self {
            NamedKey::ShiftLeft => "shift_l",
            NamedKey::ShiftRight => "shift_r",
            NamedKey::ControlLeft => "ctrl_l",
            NamedKey::ControlRight => "ctrl_r",
            NamedKey::AltLeft => "alt_l",
            NamedKey::AltRight => "alt_r",
            NamedKey::MetaLeft => "cmd_l",
            NamedKey::MetaRight => "cmd_r",
            NamedKey::F1 => "f1",
            NamedKey::F2 => "f2",
            NamedKey::F3 => "f3",
            NamedKey::F4 => "f4",
            NamedKey::F5 => "f5",
            NamedKey::F6 => "f6",
            NamedKey::F7 => "f7",
            NamedKey::F8 => "f8",
            NamedKey::F9 => "f9",
            NamedKey::F10 => "f10",
            NamedKey::F11 => "f11",
            NamedKey::F12 => "f12",
            NamedKey::Enter => "enter",
            NamedKey::Space => "space",
            NamedKey::Escape => "esc",
            NamedKey::Tab => "tab",
            NamedKey::Backspace => "backspace",
            NamedKey::Delete => "delete",
            NamedKey::Insert => "insert",
            NamedKey::Up => "up",
            NamedKey::Down => "down",
            NamedKey::Left => "left",
            NamedKey::Right => "right",
            NamedKey::Home => "home",
            NamedKey::End => "end",
            NamedKey::PageUp => "page_up",
            NamedKey::PageDown => "page_down",
            NamedKey::CapsLock => "caps_lock",
        }
    }

    /// Look up a key by canonical name or common alias (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let alias = match lower.as_str() {
            "shift" => Some(NamedKey::ShiftLeft),
            "ctrl" | "control" => Some(NamedKey::ControlLeft),
            "alt" => Some(NamedKey::AltLeft),
            "cmd" | "meta" | "super" => Some(NamedKey::MetaLeft),
            "escape" => Some(NamedKey::Escape),
            "return" => Some(NamedKey::Enter),
            _ => None,
        };

        alias.or_else(|| Self::ALL.into_iter().find(|k| k.name() == lower))
    }

    /// Shift, control, alt or meta on either side.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            NamedKey::ShiftLeft
                | NamedKey::ShiftRight
                | NamedKey::ControlLeft
                | NamedKey::ControlRight
                | NamedKey::AltLeft
                | NamedKey::AltRight
                | NamedKey::MetaLeft
                | NamedKey::MetaRight
        )
    }
}

/// A keyboard key: named, or a single lower-cased character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A non-printing or modifier key.
    Named(NamedKey),
    /// A printable key, identified by its unshifted lower-case character.
    Char(char),
}

/// Modifiers released after every playback so none is left held down.
pub const MODIFIER_GUARD_SET: [Key; 6] = [
    Key::Named(NamedKey::ShiftLeft),
    Key::Named(NamedKey::ShiftRight),
    Key::Named(NamedKey::ControlLeft),
    Key::Named(NamedKey::ControlRight),
    Key::Named(NamedKey::AltLeft),
    Key::Named(NamedKey::AltRight),
];

impl Key {
    /// Character key, normalised to lower case.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_lowercase().next().unwrap_or(c))
    }

    /// Returns the named key, if this is one.
    pub fn named(self) -> Option<NamedKey> {
        match self {
            Key::Named(k) => Some(k),
            Key::Char(_) => None,
        }
    }

    /// Either control key.
    pub fn is_control(self) -> bool {
        matches!(
            self,
            Key::Named(NamedKey::ControlLeft) | Key::Named(NamedKey::ControlRight)
        )
    }
}

/// Text that names no known key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown key name: '{0}'")]
pub struct KeyParseError(pub String);

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(if c == ' ' {
                Key::Named(NamedKey::Space)
            } else {
                Key::char(c)
            });
        }

        NamedKey::from_name(s.trim())
            .map(Key::Named)
            .ok_or_else(|| KeyParseError(s.to_string()))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Named(k) => f.write_str(k.name()),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}
