mod action;
mod chord;
mod keybind_file;
mod keybind_map;

pub use {
    action::{Action, ActionParseError},
    chord::{Chord, ChordError},
    keybind_file::{DEFAULT_APP_NAME, KeybindFile},
    keybind_map::KeybindMap,
};
