//! Snapshot naming rules

use crate::error::{ConfigError, InputField, Result};
use std::path::{Path, PathBuf};

/// Extension carried by every snapshot and by the active configuration
pub const SNAPSHOT_EXTENSION: &str = "xml";

/// A named configuration file inside the store directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    name: String,
    file_name: String,
    path: PathBuf,
}

impl Snapshot {
    /// Build a snapshot entry from a file found in the store directory
    ///
    /// Returns `None` unless the file name ends in `.xml` (any case).
    pub fn from_file_name(store: &Path, file_name: &str) -> Option<Self> {
        let suffix_len = SNAPSHOT_EXTENSION.len() + 1;
        if file_name.len() < suffix_len || !file_name.is_char_boundary(file_name.len() - suffix_len)
        {
            return None;
        }

        let (stem, suffix) = file_name.split_at(file_name.len() - suffix_len);
        let is_snapshot =
            suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(SNAPSHOT_EXTENSION);
        is_snapshot.then(|| Self {
            name: stem.to_string(),
            file_name: file_name.to_string(),
            path: store.join(file_name),
        })
    }

    /// Name without the extension, as given on export
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name as it appears on disk
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Check a user-supplied snapshot name and return it trimmed
///
/// Blank names fail with `EmptyInput`. Names that would resolve outside the
/// store directory (`.`, `..`, or anything with a path separator) fail with
/// `InvalidName`.
pub fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::EmptyInput(InputField::SnapshotName));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// File name a snapshot called `name` is stored under
pub fn snapshot_file_name(name: &str) -> String {
    format!("{name}.{SNAPSHOT_EXTENSION}")
}
