use crate::config::{default_autosave, default_loop_interval_ms, default_slice_ms};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Playback timing and recording persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Wait between two loop iterations.
    #[serde(default = "default_loop_interval_ms")]
    pub loop_interval_ms: u64,
    /// Longest uninterrupted sleep; bounds stop latency.
    #[serde(default = "default_slice_ms")]
    pub slice_ms: u64,
    /// Save every finished recording as "Untitled".
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl PlaybackConfig {
    pub fn loop_interval(&self) -> Duration {
        Duration::from_millis(self.loop_interval_ms)
    }

    pub fn slice(&self) -> Duration {
        Duration::from_millis(self.slice_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            loop_interval_ms: default_loop_interval_ms(),
            slice_ms: default_slice_ms(),
            autosave: default_autosave(),
        }
    }
}
