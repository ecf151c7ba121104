use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Sequence library location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of `.seq` files. Defaults to `saved_sequences` in the data dir.
    #[serde(default)]
    pub sequences_dir: Option<PathBuf>,
}
