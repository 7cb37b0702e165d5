//! Output file writing.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, UnbundleError};

/// Write `bytes` to `path`, replacing any existing file.
///
/// The content goes to a temp file in the same directory first and is then
/// persisted under `path`, so `path` never holds a partial write. The temp
/// file is removed if anything fails.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let wrap = |source| UnbundleError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(wrap)?;
    file.write_all(bytes).map_err(wrap)?;
    file.as_file().sync_all().map_err(wrap)?;
    file.persist(path).map_err(|e| wrap(e.error))?;

    Ok(())
}
