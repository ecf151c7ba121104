use std::{fs, path::PathBuf};

use tracing::{info, instrument, warn};

/// One-shot "may the app run" check, evaluated at startup.
///
/// Licence validation itself lives elsewhere; this only looks at the token
/// it caches. With no cache path configured the gate is open.
#[derive(Debug, Clone)]
pub struct StartupGate {
    cache_path: Option<PathBuf>,
}

impl StartupGate {
    /// Gate checking the licence token cached at `cache_path`.
    pub fn new(cache_path: Option<PathBuf>) -> Self {
        Self { cache_path }
    }

    /// Whether startup may continue.
    #[instrument(skip(self))]
    pub fn permitted(&self) -> bool {
        let Some(path) = &self.cache_path else {
            return true;
        };

        match fs::read_to_string(path) {
            Ok(token) if !token.trim().is_empty() => {
                info!(cache_path = ?path, "Licence cache present");
                true
            }
            Ok(_) => {
                warn!(cache_path = ?path, "Licence cache is empty");
                false
            }
            Err(e) => {
                warn!(cache_path = ?path, error = %e, "Licence cache unreadable");
                false
            }
        }
    }
}
