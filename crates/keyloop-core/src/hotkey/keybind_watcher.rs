use crate::{KeybindFile, KeybindMap, PauseGate};

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, SystemTime},
};

use tokio::{sync::watch, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default time between two keybind file checks.
pub const DEFAULT_CONFIG_CHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Result of one keybind file check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Modification time unchanged since the last check.
    Unchanged,
    /// The file changed and its bindings were published.
    Reloaded,
    /// The file changed but had no valid entry; old bindings kept.
    Rejected,
    /// The file could not be read.
    Missing,
}

/// Reloads the keybind file when its modification time changes.
#[derive(Debug)]
pub struct KeybindWatcher {
    path: PathBuf,
    last_modified: Option<SystemTime>,
    tx: watch::Sender<Arc<KeybindMap>>,
}

impl KeybindWatcher {
    /// Watcher publishing `initial` right away.
    ///
    /// `last_modified` is taken from the file as it is now, so the first
    /// check after construction only reloads on a later change.
    pub fn new(path: impl Into<PathBuf>, initial: KeybindMap) -> Self {
        let path = path.into();
        let last_modified = modified(&path);
        let (tx, _) = watch::channel(Arc::new(initial));
        Self {
            path,
            last_modified,
            tx,
        }
    }

    /// Receiver for the current bindings.
    pub fn subscribe(&self) -> watch::Receiver<Arc<KeybindMap>> {
        self.tx.subscribe()
    }

    /// Bindings currently published.
    pub fn current(&self) -> Arc<KeybindMap> {
        Arc::clone(&self.tx.borrow())
    }

    /// Compare the modification time and reload on change.
    ///
    /// A rejected file still advances the recorded time so the same broken
    /// content is not re-parsed on every check. A failed read does not, so
    /// the next check retries it.
    pub fn check(&mut self) -> ReloadOutcome {
        let Some(mtime) = modified(&self.path) else {
            return ReloadOutcome::Missing;
        };
        if self.last_modified == Some(mtime) {
            return ReloadOutcome::Unchanged;
        }

        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to read keybinds");
                return ReloadOutcome::Missing;
            }
        };
        self.last_modified = Some(mtime);

        match KeybindFile::parse(&text) {
            Ok(file) => {
                info!(
                    path = ?self.path,
                    valid = file.valid_entries,
                    rejected = file.rejected.len(),
                    "Keybinds reloaded"
                );
                self.tx.send_replace(Arc::new(file.map));
                ReloadOutcome::Reloaded
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Keybinds rejected, keeping previous");
                ReloadOutcome::Rejected
            }
        }
    }

    /// Check every `interval` until `cancel` fires. Checks are skipped while
    /// `pause` is set.
    pub async fn run(mut self, interval: Duration, pause: PauseGate, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Keybind watcher shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if pause.is_paused() {
                        continue;
                    }
                    self.check();
                }
            }
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
