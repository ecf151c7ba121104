use crate::config::{
    default_config_check_interval_ms, default_listener_enabled, default_max_restarts,
    default_terminate_grace_ms,
};

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// What to do when the hotkey listener process exits on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Leave it stopped; hotkeys stay unavailable.
    #[default]
    Never,
    /// Respawn after a non-zero exit, up to `max_restarts` times.
    OnCrash,
}

impl RestartPolicy {
    /// Whether to respawn after an exit, given how many restarts already happened.
    pub fn should_restart(self, exit_success: bool, restarts: u32, max_restarts: u32) -> bool {
        match self {
            RestartPolicy::Never => false,
            RestartPolicy::OnCrash => !exit_success && restarts < max_restarts,
        }
    }
}

/// Hotkey listener process settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Spawn the listener at startup.
    #[serde(default = "default_listener_enabled")]
    pub enabled: bool,
    /// Keybind JSON file. Defaults to `keybinds.json` in the config dir.
    #[serde(default)]
    pub keybinds_path: Option<PathBuf>,
    /// Time between two keybind file checks in the listener.
    #[serde(default = "default_config_check_interval_ms")]
    pub config_check_interval_ms: u64,
    /// Wait after SIGTERM before killing the listener.
    #[serde(default = "default_terminate_grace_ms")]
    pub terminate_grace_ms: u64,
    /// Respawn behaviour after the listener exits.
    #[serde(default)]
    pub restart_policy: RestartPolicy,
    /// Upper bound on respawns for `on_crash`.
    #[serde(default = "default_max_restarts")]
    pub max_restarts: u32,
}

impl ListenerConfig {
    pub fn config_check_interval(&self) -> Duration {
        Duration::from_millis(self.config_check_interval_ms)
    }

    pub fn terminate_grace(&self) -> Duration {
        Duration::from_millis(self.terminate_grace_ms)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            enabled: default_listener_enabled(),
            keybinds_path: None,
            config_check_interval_ms: default_config_check_interval_ms(),
            terminate_grace_ms: default_terminate_grace_ms(),
            restart_policy: RestartPolicy::default(),
            max_restarts: default_max_restarts(),
        }
    }
}
