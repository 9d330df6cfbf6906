//! Transfers between the active configuration and the snapshot store

use crate::error::{ConfigError, MissingItem, Result};
use crate::store::snapshot::{Snapshot, snapshot_file_name, validate_name};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Snapshot store bound to one store directory and one active config file
///
/// Import selections are indices into the most recent [`list_snapshots`]
/// result, which the store keeps until the next listing.
///
/// [`list_snapshots`]: ConfigStore::list_snapshots
#[derive(Debug)]
pub struct ConfigStore {
    location: PathBuf,
    active_config: PathBuf,
    last_listing: Vec<Snapshot>,
}

impl ConfigStore {
    /// Create a store over `location` transferring to and from `active_config`
    pub fn new(location: impl Into<PathBuf>, active_config: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            active_config: active_config.into(),
            last_listing: Vec::new(),
        }
    }

    /// Store directory
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Active configuration file
    pub fn active_config(&self) -> &Path {
        &self.active_config
    }

    /// Copy the active configuration into the store as `<name>.xml`
    ///
    /// An existing snapshot with the same name is overwritten, keeping its
    /// file name when the extension differs only in case (`Ranked.XML`).
    pub fn export(&self, name: &str) -> Result<PathBuf> {
        let name = validate_name(name)?;

        if !self.active_config.is_file() {
            return Err(ConfigError::NotFound {
                item: MissingItem::ActiveConfig,
                path: self.active_config.clone(),
            });
        }

        let destination = self
            .find_snapshot(name)
            .unwrap_or_else(|| self.location.join(snapshot_file_name(name)));
        if destination.exists() {
            debug!("Overwriting existing snapshot {:?}", destination);
        }

        std::fs::copy(&self.active_config, &destination)
            .map_err(ConfigError::io("copy config file to", &destination))?;

        info!(
            "Exported {:?} as snapshot '{}' ({:?})",
            self.active_config, name, destination
        );
        Ok(destination)
    }

    /// List `.xml` files in the store, sorted case-insensitively by file name
    ///
    /// A missing store directory lists as empty.
    pub fn list_snapshots(&mut self) -> Result<&[Snapshot]> {
        let entries = match std::fs::read_dir(&self.location) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store directory {:?} does not exist", self.location);
                self.last_listing.clear();
                return Ok(&self.last_listing);
            }
            Err(e) => return Err(ConfigError::io("list", &self.location)(e)),
        };

        let mut snapshots = Vec::new();
        for entry in entries {
            let entry = entry.map_err(ConfigError::io("list", &self.location))?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                debug!("Skipping non-UTF-8 file name {:?}", entry.file_name());
                continue;
            };
            if let Some(snapshot) = Snapshot::from_file_name(&self.location, file_name) {
                snapshots.push(snapshot);
            }
        }

        snapshots.sort_by(|a, b| {
            a.file_name()
                .to_lowercase()
                .cmp(&b.file_name().to_lowercase())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });

        debug!(
            "Found {} snapshot(s) in {:?}",
            snapshots.len(),
            self.location
        );
        self.last_listing = snapshots;
        Ok(&self.last_listing)
    }

    /// Result of the most recent [`list_snapshots`](ConfigStore::list_snapshots)
    pub fn last_listing(&self) -> &[Snapshot] {
        &self.last_listing
    }

    /// Replace the active configuration with the snapshot at 1-based `selection`
    ///
    /// Nothing is touched unless `selection` is within `[1, count]` and the
    /// chosen snapshot still exists. The active file is deleted and then the
    /// snapshot copied in its place; the content is never inspected. Selecting
    /// the active file itself (store pointed at the emulator's folder) is a
    /// successful no-op.
    pub fn import(&self, selection: usize) -> Result<&Snapshot> {
        let count = self.last_listing.len();
        let snapshot = selection
            .checked_sub(1)
            .and_then(|index| self.last_listing.get(index))
            .ok_or(ConfigError::InvalidSelection { selection, count })?;

        if !snapshot.path().is_file() {
            return Err(ConfigError::NotFound {
                item: MissingItem::Snapshot,
                path: snapshot.path().to_path_buf(),
            });
        }

        // Store pointed at the emulator's own folder: the active file was listed
        if same_file(snapshot.path(), &self.active_config) {
            info!(
                "Snapshot '{}' is the active configuration itself, leaving it as is",
                snapshot.name()
            );
            return Ok(snapshot);
        }

        if let Some(parent) = self.active_config.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(ConfigError::io("create directory", parent))?;
        }

        if self.active_config.exists() {
            std::fs::remove_file(&self.active_config)
                .map_err(ConfigError::io("remove", &self.active_config))?;
        }

        std::fs::copy(snapshot.path(), &self.active_config)
            .map_err(ConfigError::io("copy selected config to", &self.active_config))?;

        info!(
            "Imported snapshot '{}' into {:?}",
            snapshot.name(),
            self.active_config
        );
        Ok(snapshot)
    }

    /// Stored snapshot called exactly `name`, whatever the case of its extension
    fn find_snapshot(&self, name: &str) -> Option<PathBuf> {
        std::fs::read_dir(&self.location)
            .ok()?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let file_name = entry.file_name();
                Snapshot::from_file_name(&self.location, file_name.to_str()?)
            })
            .find(|snapshot| snapshot.name() == name && snapshot.path().is_file())
            .map(|snapshot| snapshot.path().to_path_buf())
    }
}

/// Whether `a` and `b` resolve to the same existing file
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
