use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Startup gate settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseConfig {
    /// Cached licence token checked once at startup. No path, no check.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}
