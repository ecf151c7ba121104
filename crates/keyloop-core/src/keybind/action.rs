use std::{fmt, str::FromStr};

use thiserror::Error;

/// Operations a hotkey can trigger.
///
/// The set is closed: users rebind chords, they do not define actions. The
/// name of each action is used for its trigger file and its keybind entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Start a new recording.
    StartRecord,
    /// Stop the recording or playback in progress.
    Stop,
    /// Start looping playback of the active sequence.
    PlayTask,
    /// Stop looping playback.
    EndTask,
}

impl Action {
    /// Every action, in dispatch order.
    pub const ALL: [Action; 4] = [
        Action::StartRecord,
        Action::Stop,
        Action::PlayTask,
        Action::EndTask,
    ];

    /// Stable name used on disk.
    pub fn name(self) -> &'static str {
        match self {
            Action::StartRecord => "start_record",
            Action::Stop => "stop",
            Action::PlayTask => "play_task",
            Action::EndTask => "end_task",
        }
    }
}

/// Older keybind files name `play_task` this way.
const START_TASK_ALIAS: &str = "start_task";

/// Text that names no known action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown action: '{0}'")]
pub struct ActionParseError(pub String);

impl FromStr for Action {
    type Err = ActionParseError;

    /// Accepts each action's [`name`](Action::name), plus `start_task` for
    /// [`Action::PlayTask`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == START_TASK_ALIAS {
            return Ok(Self::PlayTask);
        }

        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ActionParseError(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
