//! Atomic file replacement
//!
//! Writes go to a `tempfile::NamedTempFile` in the destination directory and
//! are then persisted over the target, so readers never see a half-written file.

use crate::error::{ConfigError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `contents`, creating the parent directory if needed
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(ConfigError::io("create directory", dir))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(ConfigError::io("create temp file in", dir))?;
    temp.write_all(contents)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(ConfigError::io("write temp file for", path))?;
    temp.persist(path)
        .map_err(|e| ConfigError::io("replace", path)(e.error))?;

    Ok(())
}
