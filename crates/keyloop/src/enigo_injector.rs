use crate::{
    AppError, AppResult,
    key_mapping::{button_to_enigo, to_enigo},
};

use keyloop_core::{CoreError, CoreResult, InputInjector, Key, KeyDirection, MouseButton};

use std::{panic::Location, sync::mpsc, thread};

use enigo::{Coordinate, Direction, Enigo, InputError, Keyboard, Mouse, Settings};
use error_location::ErrorLocation;
use tracing::{debug, info, warn};

#[derive(Debug)]
enum InjectCommand {
    MoveTo { x: i32, y: i32 },
    Click(MouseButton),
    Key(Key, KeyDirection),
}

/// [`InputInjector`] backed by a dedicated thread that owns the `Enigo`
/// instance.
///
/// Calls enqueue and return immediately. Failures inside the backend are
/// logged on the injector thread; only a dead thread is reported to the
/// caller.
pub struct EnigoInjector {
    tx: mpsc::Sender<InjectCommand>,
}

impl EnigoInjector {
    /// Start the injector thread and wait until `Enigo` is ready.
    #[track_caller]
    pub(crate) fn spawn() -> AppResult<Self> {
        let (tx, rx) = mpsc::channel::<InjectCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        thread::Builder::new()
            .name("keyloop-injector".to_string())
            .spawn(move || {
                let mut enigo = match Enigo::new(&Settings::default()) {
                    Ok(enigo) => {
                        let _ = ready_tx.send(Ok(()));
                        enigo
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("Failed to create Enigo: {}", e)));
                        return;
                    }
                };

                while let Ok(command) = rx.recv() {
                    if let Err(e) = apply(&mut enigo, &command) {
                        warn!(command = ?command, error = %e, "Injection failed");
                    }
                }

                debug!("Injector thread stopped");
            })
            .map_err(|e| AppError::InputHookFailed {
                reason: format!("Failed to start injector thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                info!("Input injector ready");
                Ok(Self { tx })
            }
            Ok(Err(reason)) => Err(AppError::InputHookFailed {
                reason,
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => Err(AppError::InputHookFailed {
                reason: "Injector thread exited during startup".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    #[track_caller]
    fn send(&self, command: InjectCommand) -> CoreResult<()> {
        self.tx.send(command).map_err(|_| CoreError::Injection {
            reason: "Injector thread is not running".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl InputInjector for EnigoInjector {
    fn move_to(&self, x: i32, y: i32) -> CoreResult<()> {
        self.send(InjectCommand::MoveTo { x, y })
    }

    fn click(&self, button: MouseButton) -> CoreResult<()> {
        self.send(InjectCommand::Click(button))
    }

    fn key(&self, key: Key, direction: KeyDirection) -> CoreResult<()> {
        self.send(InjectCommand::Key(key, direction))
    }
}

fn apply(enigo: &mut Enigo, command: &InjectCommand) -> Result<(), InputError> {
    match *command {
        InjectCommand::MoveTo { x, y } => enigo.move_mouse(x, y, Coordinate::Abs),
        InjectCommand::Click(button) => enigo.button(button_to_enigo(button), Direction::Click),
        InjectCommand::Key(key, direction) => {
            let Some(mapped) = to_enigo(key) else {
                debug!(key = %key, "Key has no injection mapping, skipped");
                return Ok(());
            };
            let direction = match direction {
                KeyDirection::Press => Direction::Press,
                KeyDirection::Release => Direction::Release,
            };
            enigo.key(mapped, direction)
        }
    }
}
