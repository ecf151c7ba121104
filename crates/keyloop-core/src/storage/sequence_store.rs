use crate::{CoreResult, Sequence};

/// Name under which a finished recording is saved when autosave is on.
pub const DEFAULT_SEQUENCE_NAME: &str = "Untitled";

/// Named sequence library.
///
/// Names are free text; implementations map them to whatever keys their
/// backing store allows.
pub trait SequenceStore: Send + Sync {
    /// Save `sequence` under `name`, replacing any previous one.
    fn save(&self, name: &str, sequence: &Sequence) -> CoreResult<()>;

    /// Load the sequence saved under `name`.
    ///
    /// # Errors
    ///
    /// [`crate::CoreError::SequenceNotFound`] if nothing is saved under it.
    fn load(&self, name: &str) -> CoreResult<Sequence>;

    /// Saved names, sorted.
    fn list(&self) -> CoreResult<Vec<String>>;

    /// Remove the sequence saved under `name`.
    fn delete(&self, name: &str) -> CoreResult<()>;

    /// Move the sequence saved under `from` to `to`, replacing any sequence
    /// already saved under `to`.
    fn rename(&self, from: &str, to: &str) -> CoreResult<()>;
}
