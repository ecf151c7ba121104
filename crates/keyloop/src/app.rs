use crate::{
    AppCommand, AppError, AppResult, ListenerSupervisor,
    config::Config,
    shutdown_signal::shutdown_signal,
};

use keyloop_core::{
    Action, Capturer, DEFAULT_SEQUENCE_NAME, InputInjector, LoopController, ModifierGuard,
    PauseGate, PlaybackScheduler, Sequence, SequenceStore, Session, SessionState, StopOutcome,
    TriggerChannel, TriggerPoller,
};

use std::{fs, panic::Location, path::Path, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Main application state.
///
/// Owns the recorder session. Hotkey actions arrive from the trigger poller
/// as [`AppCommand`]s and are handled one at a time, so the session needs no
/// lock. The current [`SessionState`] is published on a watch channel after
/// every command.
pub struct App {
    pub(crate) session: Session,
    pub(crate) store: Arc<dyn SequenceStore>,
    pub(crate) injector: Arc<dyn InputInjector>,
    pub(crate) triggers: TriggerChannel,
    pub(crate) pause: PauseGate,
    pub(crate) poll_interval: Duration,
    pub(crate) autosave: bool,
    pub(crate) supervisor: Option<ListenerSupervisor>,
    pub(crate) state_tx: watch::Sender<SessionState>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown: CancellationToken,
}

impl App {
    pub(crate) fn new(
        config: &Config,
        signal_dir: &Path,
        injector: Arc<dyn InputInjector>,
        store: Arc<dyn SequenceStore>,
    ) -> Self {
        let scheduler =
            PlaybackScheduler::new(Arc::clone(&injector)).with_slice(config.playback.slice());
        let looper = LoopController::new(scheduler, config.playback.loop_interval());
        let session = Session::new(Arc::new(Capturer::new()), looper);

        let mut triggers = TriggerChannel::new(signal_dir);
        if let Some(max_age) = config.signals.trigger_max_age() {
            triggers = triggers.with_max_age(max_age);
        }

        let (command_tx, command_rx) = mpsc::channel(32);
        let (state_tx, _) = watch::channel(SessionState::Idle);

        Self {
            session,
            store,
            injector,
            triggers,
            pause: PauseGate::new(signal_dir),
            poll_interval: config.signals.poll_interval(),
            autosave: config.playback.autosave,
            supervisor: None,
            state_tx,
            command_tx,
            command_rx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Run the hotkey listener under `supervisor` while the app is up.
    pub(crate) fn with_supervisor(mut self, supervisor: ListenerSupervisor) -> Self {
        self.supervisor = Some(supervisor);
        self
    }

    /// The capturer the input hook should feed.
    pub(crate) fn capturer(&self) -> Arc<Capturer> {
        Arc::clone(self.session.capturer())
    }

    pub(crate) fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Make the sequence saved under `name` the active one.
    #[instrument(skip(self))]
    pub(crate) fn load_sequence(&mut self, name: &str) -> AppResult<()> {
        let sequence = self.store.load(name)?;
        self.session.set_sequence(sequence);
        info!(sequence = name, "Loaded saved sequence");
        Ok(())
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Keyloop starting");

        fs::create_dir_all(self.triggers.dir())?;
        self.triggers.purge();
        if let Err(e) = self.pause.exit() {
            warn!(error = %e, "Failed to clear pause marker");
        }

        let poller = TriggerPoller::new(
            self.triggers.clone(),
            self.pause.clone(),
            self.poll_interval,
        );
        let poller_tx = self.command_tx.clone();
        let poller_handle = tokio::spawn(poller.run(self.shutdown.clone(), move |action| {
            poller_tx
                .try_send(AppCommand::Action { action })
                .map_err(|e| AppError::ChannelSendFailed {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
        }));

        let supervisor_handle = self
            .supervisor
            .take()
            .map(|supervisor| tokio::spawn(supervisor.run(self.shutdown.clone())));

        let signal_tx = self.command_tx.clone();
        let signal_cancel = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                signal = shutdown_signal() => {
                    info!(signal = ?signal, "Shutdown signal received");
                    if let Err(e) = signal_tx.send(AppCommand::Shutdown).await {
                        error!(error = ?e, "Failed to send shutdown command");
                    }
                }
                _ = signal_cancel.cancelled() => {}
            }
        });

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::Action { action } => self.handle_action(action).await,
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        self.stop().await;
        self.release_modifiers();
        self.publish_state();

        self.shutdown.cancel();

        if let Err(e) = poller_handle.await {
            error!(error = ?e, "Trigger poller task panicked");
        }

        if let Some(handle) = supervisor_handle {
            match handle.await {
                Ok(exit) => info!(exit = ?exit, "Listener supervision ended"),
                Err(e) => error!(error = ?e, "Listener supervisor task panicked"),
            }
        }

        if let Err(e) = self.pause.exit() {
            warn!(error = %e, "Failed to clear pause marker");
        }

        info!("Keyloop shut down successfully");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn handle_action(&mut self, action: Action) {
        match action {
            Action::StartRecord => {
                if let Err(e) = self.session.start_recording() {
                    warn!(error = %e, "Cannot start recording");
                }
            }
            Action::Stop => self.stop().await,
            Action::PlayTask => match self.session.start_loop() {
                Ok(run_id) => info!(run_id = %run_id, "Looping playback started"),
                Err(e) => warn!(error = %e, "Cannot start playback"),
            },
            Action::EndTask => {
                match self.session.end_loop().await {
                    Some(report) => info!(report = ?report, "Looping playback ended"),
                    None => debug!("No playback to end"),
                }
                self.release_modifiers();
            }
        }

        self.publish_state();
    }

    async fn stop(&mut self) {
        match self.session.stop().await {
            StopOutcome::Recording(sequence) => {
                if self.autosave && !sequence.is_empty() {
                    self.save_recording(&sequence);
                }
            }
            StopOutcome::Playback(report) => info!(report = ?report, "Playback stopped"),
            StopOutcome::Idle => debug!("Nothing to stop"),
        }
    }

    fn save_recording(&self, sequence: &Sequence) {
        match self.store.save(DEFAULT_SEQUENCE_NAME, sequence) {
            Ok(()) => info!(
                sequence = DEFAULT_SEQUENCE_NAME,
                event_count = sequence.len(),
                "Recording saved"
            ),
            Err(e) => error!(error = %e, "Failed to save recording"),
        }
    }

    fn release_modifiers(&self) {
        // The guard releases when dropped.
        let _release = ModifierGuard::new(Arc::clone(&self.injector));
    }

    fn publish_state(&self) {
        let state = self.session.state();
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            debug!(from = ?*current, to = ?state, "Session state changed");
            *current = state;
            true
        });
    }
}
