use crate::SessionState;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Recorder, playback and signaling errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Playback was requested for a sequence with no events.
    #[error("Sequence is empty {location}")]
    EmptySequence {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The session is already doing something that excludes the request.
    #[error("Session is busy ({state}) {location}")]
    SessionBusy {
        /// State the session was in when the request was refused.
        state: SessionState,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Keybind file missing, unreadable, or without a single valid entry.
    #[error("Invalid keybind configuration: {reason} {location}")]
    ConfigInvalid {
        /// Description of what was wrong.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No saved sequence with this name.
    #[error("Sequence not found: {name} {location}")]
    SequenceNotFound {
        /// Requested sequence name.
        name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Encoding or decoding a persisted document failed.
    #[error("Serialization error: {reason} {location}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The input injection backend refused an event.
    #[error("Input injection failed: {reason} {location}")]
    Injection {
        /// Description of the injection failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    #[track_caller]
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
