//! Subcommand dispatch.

use crate::{
    App, AppError, AppResult, EnigoInjector, ListenerSupervisor, StartupGate,
    cli::{Cli, Commands, KeybindsAction, PauseAction, SequencesAction},
    config::Config,
    input_hook::spawn_capture_hook,
    listener_process::run_listener,
    shutdown_signal::shutdown_signal,
};

use keyloop_core::{
    Action, Chord, DEFAULT_CONFIG_CHECK_INTERVAL, InputInjector, JsonSequenceStore, Key,
    KeybindFile, PauseGate, PlaybackOutcome, PlaybackScheduler, SequenceStore, TriggerChannel,
};

use std::{fs, panic::Location, path::Path, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

/// Run the subcommand selected on the command line.
pub(crate) async fn dispatch(cli: Cli) -> AppResult<()> {
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Run { sequence: None }) {
        Commands::Run { sequence } => {
            run_recorder(&load_config(config_path)?, sequence.as_deref()).await
        }
        // The listener is handed explicit paths and never reads the config.
        Commands::Listener {
            signal_dir,
            keybinds,
            check_interval_ms,
        } => {
            let interval = check_interval_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CONFIG_CHECK_INTERVAL);
            run_listener(&signal_dir, &keybinds, interval).await
        }
        Commands::Play { name } => play(&load_config(config_path)?, &name).await,
        Commands::Trigger { action } => trigger(&load_config(config_path)?, action),
        Commands::Pause { action } => pause(&load_config(config_path)?, action),
        Commands::Sequences { action } => sequences(&load_config(config_path)?, action),
        Commands::Keybinds { action } => keybinds(&load_config(config_path)?, action),
    }
}

fn load_config(path: Option<&Path>) -> AppResult<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

#[instrument(skip(config))]
async fn run_recorder(config: &Config, sequence: Option<&str>) -> AppResult<()> {
    if !StartupGate::new(config.license.cache_path.clone()).permitted() {
        return Err(AppError::StartupDenied {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let signal_dir = config.signal_dir()?;
    let injector: Arc<dyn InputInjector> = Arc::new(EnigoInjector::spawn()?);
    let store = Arc::new(JsonSequenceStore::new(config.sequences_dir()?));

    let mut app = App::new(config, &signal_dir, injector, store);
    if let Some(name) = sequence {
        app.load_sequence(name)?;
    }

    spawn_capture_hook(app.capturer())?;

    if config.listener.enabled {
        let supervisor = config.keybinds_path().and_then(|keybinds| {
            ListenerSupervisor::for_current_exe(&signal_dir, &keybinds, &config.listener)
        });
        app = attach_listener(app, supervisor);
    } else {
        info!("Hotkey listener disabled, use `keyloop trigger` to drive the recorder");
    }

    let mut state_rx = app.subscribe_state();
    tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            let state = *state_rx.borrow_and_update();
            info!(state = ?state, "Session state");
        }
    });

    app.run().await
}

/// Hand `supervisor` to `app`. If it could not be built, log why and keep
/// going without hotkeys; trigger files still drive the recorder.
pub(crate) fn attach_listener(app: App, supervisor: AppResult<ListenerSupervisor>) -> App {
    match supervisor {
        Ok(supervisor) => app.with_supervisor(supervisor),
        Err(e) => {
            error!(
                error = %e,
                "Hotkeys unavailable, use `keyloop trigger` to drive the recorder"
            );
            app
        }
    }
}

#[instrument(skip(config))]
async fn play(config: &Config, name: &str) -> AppResult<()> {
    let store = JsonSequenceStore::new(config.sequences_dir()?);
    let sequence = store.load(name)?;

    let injector: Arc<dyn InputInjector> = Arc::new(EnigoInjector::spawn()?);
    let scheduler = PlaybackScheduler::new(injector).with_slice(config.playback.slice());

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        info!(signal = ?signal, "Cancelling playback");
        signal_cancel.cancel();
    });

    match scheduler.play(&sequence, &cancel).await? {
        PlaybackOutcome::Completed { events } => info!(events, "Playback finished"),
        PlaybackOutcome::Cancelled { events } => info!(events, "Playback cancelled"),
    }

    Ok(())
}

fn trigger(config: &Config, action: Action) -> AppResult<()> {
    let signal_dir = config.signal_dir()?;
    fs::create_dir_all(&signal_dir)?;
    TriggerChannel::new(&signal_dir).fire(action)?;
    info!(action = %action, "Trigger sent");
    Ok(())
}

fn pause(config: &Config, action: PauseAction) -> AppResult<()> {
    let signal_dir = config.signal_dir()?;
    let gate = PauseGate::new(&signal_dir);

    match action {
        PauseAction::Enter => {
            fs::create_dir_all(&signal_dir)?;
            gate.enter()?;
            info!("Hotkeys suspended");
        }
        PauseAction::Exit => {
            gate.exit()?;
            info!("Hotkeys resumed");
        }
        PauseAction::Status => {
            println!("{}", if gate.is_paused() { "paused" } else { "active" });
        }
    }

    Ok(())
}

fn sequences(config: &Config, action: SequencesAction) -> AppResult<()> {
    let store = JsonSequenceStore::new(config.sequences_dir()?);

    match action {
        SequencesAction::List => {
            for name in store.list()? {
                println!("{}", name);
            }
        }
        SequencesAction::Delete { name } => store.delete(&name)?,
        SequencesAction::Rename { from, to } => store.rename(&from, &to)?,
    }

    Ok(())
}

fn keybinds(config: &Config, action: KeybindsAction) -> AppResult<()> {
    let path = config.keybinds_path()?;

    match action {
        KeybindsAction::Show => {
            let file = KeybindFile::load_or_create(&path);
            for (action, chord) in file.map.iter() {
                println!("{:<13}{}", action, chord);
            }
        }
        KeybindsAction::Set {
            action,
            modifier,
            key,
        } => set_keybind(&path, action, &modifier, &key)?,
        KeybindsAction::Reset => {
            KeybindFile::defaults().save(&path)?;
            info!("Keybinds reset to defaults");
        }
    }

    Ok(())
}

/// Rebind `action` in the file at `path`.
///
/// Rejected if the chord is invalid or already bound to another action;
/// the file is left unchanged in both cases.
#[track_caller]
pub(crate) fn set_keybind(path: &Path, action: Action, modifier: &str, key: &str) -> AppResult<()> {
    let parse = |text: &str| {
        text.parse::<Key>().map_err(|e| AppError::ConfigError {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    };
    let chord = Chord::new(parse(modifier)?, parse(key)?).map_err(|e| AppError::ConfigError {
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut file = KeybindFile::load_or_create(path);
    if let Some(other) = file
        .map
        .iter()
        .find(|(other, bound)| *other != action && *bound == chord)
        .map(|(other, _)| other)
    {
        return Err(AppError::ConfigError {
            reason: format!("{} is already bound to {}", chord, other),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let previous = file.map.set(action, chord);
    file.save(path)?;

    if previous != chord {
        info!(action = %action, from = %previous, to = %chord, "Keybind changed");
    } else {
        info!(action = %action, chord = %chord, "Keybind unchanged");
    }

    Ok(())
}
