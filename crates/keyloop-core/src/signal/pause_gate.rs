use crate::CoreResult;

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

/// File name of the pause marker.
pub const PAUSE_MARKER_FILE: &str = "pause_listener.trigger";

/// Cross-process "hotkeys suspended" flag.
///
/// The marker's existence is the whole signal: entering twice and exiting
/// once leaves the gate open.
#[derive(Debug, Clone)]
pub struct PauseGate {
    path: PathBuf,
}

impl PauseGate {
    /// Gate whose marker lives in `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(PAUSE_MARKER_FILE),
        }
    }

    /// Path of the marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Suspend hotkeys. Idempotent.
    #[instrument(skip(self))]
    pub fn enter(&self) -> CoreResult<()> {
        fs::write(&self.path, b"")?;
        debug!(path = ?self.path, "Pause entered");
        Ok(())
    }

    /// Resume hotkeys. Idempotent.
    #[instrument(skip(self))]
    pub fn exit(&self) -> CoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = ?self.path, "Pause exited"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Whether hotkeys are suspended.
    pub fn is_paused(&self) -> bool {
        self.path.exists()
    }
}
