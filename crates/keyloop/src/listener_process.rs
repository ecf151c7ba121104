//! The `listener` subcommand: a separate process that turns global hotkeys
//! into trigger files for the recorder.

use crate::{
    AppResult,
    input_hook::spawn_hook,
    key_mapping::from_rdev,
    shutdown_signal::shutdown_signal,
};

use keyloop_core::{
    HotkeyListener, KeybindFile, KeybindWatcher, ListenerSignal, PauseGate, TriggerChannel,
};

use std::{fs, path::Path, time::Duration};

use rdev::EventType;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

/// Run until the kill chord, SIGINT or SIGTERM.
///
/// The recorder owns the trigger directory's lifecycle; the listener only
/// writes triggers and reads the pause marker.
#[instrument]
pub(crate) async fn run_listener(
    signal_dir: &Path,
    keybinds_path: &Path,
    check_interval: Duration,
) -> AppResult<()> {
    fs::create_dir_all(signal_dir)?;

    let keybinds = KeybindFile::load_or_create(keybinds_path);
    for (first, second) in keybinds.map.conflicts() {
        warn!(first = %first, second = %second, "Actions share a chord, only the first fires");
    }

    let watcher = KeybindWatcher::new(keybinds_path, keybinds.map);
    let pause = PauseGate::new(signal_dir);
    let mut listener = HotkeyListener::new(
        watcher.subscribe(),
        pause.clone(),
        TriggerChannel::new(signal_dir),
    );

    let cancel = CancellationToken::new();

    let kill = cancel.clone();
    spawn_hook("keyloop-hotkeys", move |event: rdev::Event| {
        let signal = match event.event_type {
            EventType::KeyPress(key) => from_rdev(key).map(|key| listener.on_key_down(key)),
            EventType::KeyRelease(key) => from_rdev(key).map(|key| listener.on_key_up(key)),
            _ => None,
        };

        if signal == Some(ListenerSignal::Kill) {
            kill.cancel();
        }
    })?;

    let watcher_handle = tokio::spawn(watcher.run(check_interval, pause, cancel.clone()));

    info!(signal_dir = ?signal_dir, "Hotkey listener ready");

    tokio::select! {
        _ = cancel.cancelled() => info!("Kill chord pressed, listener exiting"),
        signal = shutdown_signal() => info!(signal = ?signal, "Listener stopping"),
    }

    cancel.cancel();
    if let Err(e) = watcher_handle.await {
        error!(error = ?e, "Keybind watcher task panicked");
    }

    Ok(())
}
