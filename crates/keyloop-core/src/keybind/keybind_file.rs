//! The JSON keybind document shared by both processes.
//!
//! ```json
//! {
//!   "app_name": "Keyloop",
//!   "keybinds": {
//!     "start_record": ["shift_l", "r"],
//!     "stop": ["shift_l", "q"]
//!   }
//! }
//! ```
//!
//! Entries are validated one by one. Unknown actions and malformed chords are
//! dropped with a warning and the affected actions fall back to their
//! built-in chords. A document with no valid entry at all is rejected.

use crate::{Action, Chord, CoreError, CoreResult, KeybindMap, persist::write_atomic};

use std::{collections::BTreeMap, fs, io::ErrorKind, panic::Location, path::Path};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// App name written into a fresh keybind file.
pub const DEFAULT_APP_NAME: &str = "Keyloop";

/// A keybind file after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindFile {
    /// Display name of the application.
    pub app_name: String,
    /// Complete bindings, defaults backfilled.
    pub map: KeybindMap,
    /// Entries accepted from the document.
    pub valid_entries: usize,
    /// Entry names that were dropped.
    pub rejected: Vec<String>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    app_name: Option<String>,
    #[serde(default)]
    keybinds: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
struct Document<'a> {
    app_name: &'a str,
    keybinds: BTreeMap<&'static str, Chord>,
}

impl KeybindFile {
    /// Built-in bindings.
    pub fn defaults() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            map: KeybindMap::default(),
            valid_entries: Action::ALL.len(),
            rejected: Vec::new(),
        }
    }

    /// Validate a keybind document.
    ///
    /// # Errors
    ///
    /// [`CoreError::ConfigInvalid`] if the text is not a JSON object or no
    /// entry is valid.
    #[track_caller]
    pub fn parse(text: &str) -> CoreResult<Self> {
        let raw: RawDocument =
            serde_json::from_str(text).map_err(|e| CoreError::ConfigInvalid {
                reason: format!("Failed to parse keybinds: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut map = KeybindMap::default();
        let mut valid_entries = 0;
        let mut rejected = Vec::new();

        for (name, value) in raw.keybinds {
            let Ok(action) = name.parse::<Action>() else {
                warn!(entry = %name, "Unknown action in keybinds, ignoring");
                rejected.push(name);
                continue;
            };

            match serde_json::from_value::<Chord>(value) {
                Ok(chord) => {
                    map.set(action, chord);
                    valid_entries += 1;
                }
                Err(e) => {
                    warn!(
                        action = %action,
                        error = %e,
                        default = %KeybindMap::default_chord(action),
                        "Invalid chord, using default"
                    );
                    rejected.push(name);
                }
            }
        }

        if valid_entries == 0 {
            return Err(CoreError::ConfigInvalid {
                reason: "No valid keybinds found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        for (a, b) in map.conflicts() {
            warn!(first = %a, second = %b, chord = %map.chord(a), "Two actions share a chord");
        }

        Ok(Self {
            app_name: raw
                .app_name
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            map,
            valid_entries,
            rejected,
        })
    }

    /// Read and validate the file at `path`.
    ///
    /// # Errors
    ///
    /// [`CoreError::ConfigInvalid`] if the file is missing, unreadable, or
    /// has no valid entry.
    #[track_caller]
    #[instrument]
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| CoreError::ConfigInvalid {
            reason: match e.kind() {
                ErrorKind::NotFound => format!("Keybind file not found: {:?}", path),
                _ => format!("Failed to read keybinds: {}", e),
            },
            location: ErrorLocation::from(Location::caller()),
        })?;

        let file = Self::parse(&text)?;

        info!(
            path = ?path,
            valid = file.valid_entries,
            rejected = file.rejected.len(),
            "Keybinds loaded"
        );

        Ok(file)
    }

    /// Load `path`, or fall back to defaults and persist them.
    ///
    /// A partially valid file is used as is (backfilled in memory) and left
    /// untouched on disk. Failing to persist the defaults is logged, not
    /// returned: the in-memory defaults still work.
    #[instrument]
    pub fn load_or_create(path: &Path) -> Self {
        match Self::load(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "Keybinds unavailable, using defaults");
                let defaults = Self::defaults();
                if let Err(e) = defaults.save(path) {
                    warn!(error = %e, path = ?path, "Failed to write default keybinds");
                }
                defaults
            }
        }
    }

    /// Write the bindings to `path` atomically.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let document = Document {
            app_name: &self.app_name,
            keybinds: self.map.iter().map(|(a, c)| (a.name(), c)).collect(),
        };
        let text = serde_json::to_string_pretty(&document)?;
        write_atomic(path, text.as_bytes())?;

        info!(path = ?path, "Keybinds saved");

        Ok(())
    }
}
