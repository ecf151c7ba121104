use crate::Key;

use serde::{Deserialize, Serialize};

/// Mouse button recorded with a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

/// What happened, without the timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Pointer moved to an absolute screen position.
    Move {
        /// Horizontal position in pixels.
        x: i32,
        /// Vertical position in pixels.
        y: i32,
    },
    /// Button pressed at an absolute screen position.
    Click {
        /// Horizontal position in pixels.
        x: i32,
        /// Vertical position in pixels.
        y: i32,
        /// Button that was pressed.
        button: MouseButton,
    },
    /// Key went down.
    KeyDown {
        /// The key.
        key: Key,
    },
    /// Key came back up.
    KeyUp {
        /// The key.
        key: Key,
    },
}

/// One captured input occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Capture time in seconds on the capturer's monotonic clock.
    pub t: f64,
    /// The captured input.
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Create an event captured at `t` seconds.
    pub fn new(t: f64, kind: EventKind) -> Self {
        Self { t, kind }
    }
}
