#[allow(clippy::module_inception)]
mod config;
mod license_config;
mod listener_config;
mod playback_config;
mod signal_config;
mod storage_config;

pub(crate) use {
    config::Config,
    license_config::LicenseConfig,
    listener_config::{ListenerConfig, RestartPolicy},
    playback_config::PlaybackConfig,
    signal_config::SignalConfig,
    storage_config::StorageConfig,
};

pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub(crate) const DEFAULT_TRIGGER_MAX_AGE_SECS: u64 = 10;
pub(crate) const DEFAULT_LOOP_INTERVAL_MS: u64 = 5_000;
pub(crate) const DEFAULT_SLICE_MS: u64 = 100;
pub(crate) const DEFAULT_AUTOSAVE: bool = true;
pub(crate) const DEFAULT_LISTENER_ENABLED: bool = true;
pub(crate) const DEFAULT_CONFIG_CHECK_INTERVAL_MS: u64 = 5_000;
pub(crate) const DEFAULT_TERMINATE_GRACE_MS: u64 = 2_000;
pub(crate) const DEFAULT_MAX_RESTARTS: u32 = 3;

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_trigger_max_age_secs() -> u64 {
    DEFAULT_TRIGGER_MAX_AGE_SECS
}

pub(crate) fn default_loop_interval_ms() -> u64 {
    DEFAULT_LOOP_INTERVAL_MS
}

pub(crate) fn default_slice_ms() -> u64 {
    DEFAULT_SLICE_MS
}

pub(crate) fn default_autosave() -> bool {
    DEFAULT_AUTOSAVE
}

pub(crate) fn default_listener_enabled() -> bool {
    DEFAULT_LISTENER_ENABLED
}

pub(crate) fn default_config_check_interval_ms() -> u64 {
    DEFAULT_CONFIG_CHECK_INTERVAL_MS
}

pub(crate) fn default_terminate_grace_ms() -> u64 {
    DEFAULT_TERMINATE_GRACE_MS
}

pub(crate) fn default_max_restarts() -> u32 {
    DEFAULT_MAX_RESTARTS
}
