use crate::config::{default_poll_interval_ms, default_trigger_max_age_secs};

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Trigger channel and pause marker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Directory shared with the hotkey listener. Defaults to the data dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Time between two trigger scans.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Triggers older than this are discarded. `0` disables expiry.
    #[serde(default = "default_trigger_max_age_secs")]
    pub trigger_max_age_secs: u64,
}

impl SignalConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn trigger_max_age(&self) -> Option<Duration> {
        (self.trigger_max_age_secs > 0).then(|| Duration::from_secs(self.trigger_max_age_secs))
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            dir: None,
            poll_interval_ms: default_poll_interval_ms(),
            trigger_max_age_secs: default_trigger_max_age_secs(),
        }
    }
}
