use crate::LoopMode;

use std::fmt;

/// What the session is doing right now. Exactly one holds at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing running.
    Idle,
    /// Capturer armed.
    Recording,
    /// Single playback in progress.
    Playing,
    /// Repeated playback in progress.
    Looping,
}

impl From<LoopMode> for SessionState {
    fn from(mode: LoopMode) -> Self {
        match mode {
            LoopMode::Once => SessionState::Playing,
            LoopMode::Repeat => SessionState::Looping,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Idle => "idle",
            SessionState::Recording => "recording",
            SessionState::Playing => "playing",
            SessionState::Looping => "looping",
        })
    }
}
