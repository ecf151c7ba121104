//! Sequence library as one JSON document per file.
//!
//! `<dir>/<name>.seq` holds `{"name": "...", "events": [...]}`. Names are
//! sanitized into file stems; the stored `name` field keeps the original.

use crate::{CoreError, CoreResult, Sequence, SequenceStore, persist::write_atomic};

use std::{
    fs,
    io::ErrorKind,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// File extension of saved sequences.
pub const SEQUENCE_EXTENSION: &str = "seq";

#[derive(Deserialize)]
struct SequenceDocument {
    events: Sequence,
}

#[derive(Serialize)]
struct SequenceDocumentRef<'a> {
    name: &'a str,
    events: &'a Sequence,
}

/// [`SequenceStore`] over a directory of `.seq` files.
#[derive(Debug, Clone)]
pub struct JsonSequenceStore {
    dir: PathBuf,
}

impl JsonSequenceStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the `.seq` files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a sequence called `name` is stored in.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sanitize(name), SEQUENCE_EXTENSION))
    }

    #[track_caller]
    fn not_found(name: &str) -> CoreError {
        CoreError::SequenceNotFound {
            name: name.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl SequenceStore for JsonSequenceStore {
    #[instrument(skip(self, sequence), fields(event_count = sequence.len()))]
    fn save(&self, name: &str, sequence: &Sequence) -> CoreResult<()> {
        let document = SequenceDocumentRef {
            name,
            events: sequence,
        };
        let json = serde_json::to_vec_pretty(&document)?;
        write_atomic(&self.path(name), &json)?;

        info!(sequence = name, "Sequence saved");

        Ok(())
    }

    #[instrument(skip(self))]
    fn load(&self, name: &str) -> CoreResult<Sequence> {
        let text = match fs::read_to_string(self.path(name)) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Self::not_found(name)),
            Err(e) => return Err(e.into()),
        };

        let document: SequenceDocument = serde_json::from_str(&text)?;

        debug!(sequence = name, event_count = document.events.len(), "Sequence loaded");

        Ok(document.events)
    }

    fn list(&self) -> CoreResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(e) => e,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SEQUENCE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();

        Ok(names)
    }

    #[instrument(skip(self))]
    fn delete(&self, name: &str) -> CoreResult<()> {
        match fs::remove_file(self.path(name)) {
            Ok(()) => {
                info!(sequence = name, "Sequence deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Self::not_found(name)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    fn rename(&self, from: &str, to: &str) -> CoreResult<()> {
        let sequence = self.load(from)?;
        if self.path(from) == self.path(to) {
            return Ok(());
        }

        self.save(to, &sequence)?;
        fs::remove_file(self.path(from))?;

        info!(from, to, "Sequence renamed");

        Ok(())
    }
}

/// File stem for a sequence name.
///
/// A trailing `.seq` is dropped so `foo` and `foo.seq` name the same
/// sequence. Path separators and other unsafe characters become `_`.
fn sanitize(name: &str) -> String {
    let trimmed = name.trim();
    let stem = trimmed
        .strip_suffix(&format!(".{}", SEQUENCE_EXTENSION))
        .unwrap_or(trimmed);

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        cleaned
    }
}
