use crate::CoreResult;

use std::{fs, io::Write, path::Path};

use tracing::debug;

/// Replace `path` with `contents` via a temp file and rename.
///
/// Readers (the listener's config watcher, a concurrent `load`) see either
/// the old file or the new one, never a half-written document.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> CoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let mut temp_file = fs::File::create(temp_path)?;
    temp_file.write_all(contents)?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(temp_path, path)?;

    debug!(path = ?path, bytes = contents.len(), "Atomic write complete");

    Ok(())
}
