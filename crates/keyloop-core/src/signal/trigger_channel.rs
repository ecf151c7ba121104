//! One-shot command signals carried by file presence.
//!
//! The writer creates `<action>.trigger`; the reader deletes it and runs the
//! action. Content is the write time and is never parsed. Two writes before a
//! read collapse into one dispatch; two readers racing on one file dispatch it
//! at most once.

use crate::{Action, CoreResult};

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use tracing::{debug, instrument, warn};

/// File name suffix of trigger files.
pub const TRIGGER_EXTENSION: &str = "trigger";

/// Result of trying to consume a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeOutcome {
    /// No trigger was pending.
    Absent,
    /// The trigger was pending and this call consumed it.
    Taken,
    /// The trigger vanished between the existence test and the delete.
    Raced,
    /// The trigger was older than the max age; it was deleted, not consumed.
    Expired,
}

/// Trigger files for every [`Action`] in one directory.
#[derive(Debug, Clone)]
pub struct TriggerChannel {
    dir: PathBuf,
    max_age: Option<Duration>,
}

impl TriggerChannel {
    /// Channel rooted at `dir`. Triggers never expire.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_age: None,
        }
    }

    /// Discard triggers older than `max_age` instead of dispatching them.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Directory holding the trigger files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the trigger file for `action`.
    pub fn path(&self, action: Action) -> PathBuf {
        self.dir
            .join(format!("{}.{}", action.name(), TRIGGER_EXTENSION))
    }

    /// Signal `action`, overwriting a trigger that is still pending.
    #[instrument(skip(self))]
    pub fn fire(&self, action: Action) -> CoreResult<()> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        fs::write(self.path(action), format!("{:.6}", now.as_secs_f64()))?;

        debug!(action = %action, "Trigger written");

        Ok(())
    }

    /// Whether a trigger for `action` is waiting.
    pub fn is_pending(&self, action: Action) -> bool {
        self.path(action).exists()
    }

    /// Consume the trigger for `action` if one is waiting.
    ///
    /// The file is deleted before the caller acts on it. Only `Taken` means
    /// the caller should run the action. IO errors other than "not found"
    /// are logged and reported as `Absent`.
    pub fn take(&self, action: Action) -> TakeOutcome {
        let path = self.path(action);

        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => return TakeOutcome::Absent,
            Err(e) => {
                warn!(action = %action, error = %e, "Failed to stat trigger");
                return TakeOutcome::Absent;
            }
        };

        let expired = self.max_age.is_some_and(|max_age| {
            metadata
                .modified()
                .ok()
                .and_then(|modified| SystemTime::now().duration_since(modified).ok())
                .is_some_and(|age| age > max_age)
        });

        match fs::remove_file(&path) {
            Ok(()) if expired => TakeOutcome::Expired,
            Ok(()) => TakeOutcome::Taken,
            Err(e) if e.kind() == ErrorKind::NotFound => TakeOutcome::Raced,
            Err(e) => {
                warn!(action = %action, error = %e, "Failed to delete trigger, skipping");
                TakeOutcome::Absent
            }
        }
    }

    /// Delete every pending trigger. Returns how many were removed.
    #[instrument(skip(self))]
    pub fn purge(&self) -> usize {
        let mut removed = 0;
        for action in Action::ALL {
            match fs::remove_file(self.path(action)) {
                Ok(()) => {
                    removed += 1;
                    debug!(action = %action, "Leftover trigger removed");
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(action = %action, error = %e, "Failed to remove trigger"),
            }
        }
        removed
    }
}
