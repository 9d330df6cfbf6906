//! Persisted store location
//!
//! The directory holding snapshots is chosen once and remembered in a single
//! line of `%APPDATA%\AndroidTBoxConfigManager\config_dir.txt`.

use crate::config::paths::AppPaths;
use crate::error::{ConfigError, InputField, Result};
use crate::utils::atomic_file::write_atomic;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Handle on the side-file recording the store location
#[derive(Debug, Clone)]
pub struct LocationFile {
    path: PathBuf,
}

impl LocationFile {
    /// Use the side-file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the standard side-file under the per-user state directory
    pub fn from_paths(paths: &AppPaths) -> Self {
        Self::new(paths.location_file())
    }

    /// Path of the side-file itself
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the remembered store location
    ///
    /// A missing or blank side-file yields `None`.
    pub fn load(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(ConfigError::io("read store location from", &self.path))?;
        let trimmed = contents.trim();

        if trimmed.is_empty() {
            debug!("Store location file {:?} is blank", self.path);
            return Ok(None);
        }

        Ok(Some(PathBuf::from(trimmed)))
    }

    /// Remember `location` for future runs
    pub fn save(&self, location: &Path) -> Result<()> {
        write_atomic(&self.path, location.to_string_lossy().as_bytes())?;
        info!("Store location {:?} saved to {:?}", location, self.path);
        Ok(())
    }
}

/// Return the store directory, asking for it on first run
///
/// `prompt` is only called when nothing is remembered yet. Its answer is
/// trimmed, rejected when blank, created on disk and then persisted, so a
/// directory that cannot be created is never remembered. A remembered
/// directory that has since disappeared is recreated.
pub fn resolve_location<F>(file: &LocationFile, prompt: F) -> Result<PathBuf>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(location) = file.load()? {
        ensure_store_dir(&location)?;
        debug!("Using remembered store location {:?}", location);
        return Ok(location);
    }

    let answer = prompt()?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(ConfigError::EmptyInput(InputField::StoreDirectory));
    }

    let location = PathBuf::from(answer);
    ensure_store_dir(&location)?;
    file.save(&location)?;

    Ok(location)
}

fn ensure_store_dir(location: &Path) -> Result<()> {
    if location.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(location).map_err(ConfigError::io("create directory", location))?;
    info!("Created store directory {:?}", location);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;

    #[test]
    fn test_load_missing_file_is_none() {
        let temp_dir = create_test_dir();
        let file = LocationFile::new(temp_dir.path().join("config_dir.txt"));

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_trims_and_treats_blank_as_missing() {
        let temp_dir = create_test_dir();
        let file = LocationFile::new(temp_dir.path().join("config_dir.txt"));

        std::fs::write(file.path(), "   \n").unwrap();
        assert!(file.load().unwrap().is_none());

        std::fs::write(file.path(), "  D:\\configs\r\n").unwrap();
        assert_eq!(file.load().unwrap(), Some(PathBuf::from("D:\\configs")));
    }

    #[test]
    fn test_first_run_prompts_creates_and_persists() {
        let temp_dir = create_test_dir();
        let file = LocationFile::new(temp_dir.path().join("state").join("config_dir.txt"));
        let store = temp_dir.path().join("store");
        let answer = format!("  {}  ", store.display());

        let resolved = resolve_location(&file, || Ok(answer)).unwrap();

        assert_eq!(resolved, store);
        assert!(store.is_dir());
        assert_eq!(file.load().unwrap(), Some(store));
    }

    #[test]
    fn test_remembered_location_skips_prompt() {
        let temp_dir = create_test_dir();
        let file = LocationFile::new(temp_dir.path().join("config_dir.txt"));
        let store = temp_dir.path().join("store");
        file.save(&store).unwrap();

        let resolved = resolve_location(&file, || panic!("prompt must not be called")).unwrap();

        assert_eq!(resolved, store);
        assert!(store.is_dir(), "missing remembered directory is recreated");
    }

    #[test]
    fn test_empty_answer_is_rejected_and_not_persisted() {
        let temp_dir = create_test_dir();
        let file = LocationFile::new(temp_dir.path().join("config_dir.txt"));

        let result = resolve_location(&file, || Ok("   ".to_string()));

        assert!(matches!(
            result,
            Err(ConfigError::EmptyInput(InputField::StoreDirectory))
        ));
        assert!(!file.path().exists());
    }

    #[test]
    fn test_uncreatable_directory_is_not_persisted() {
        let temp_dir = create_test_dir();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let file = LocationFile::new(temp_dir.path().join("config_dir.txt"));
        let answer = blocker.join("store").to_string_lossy().into_owned();

        let result = resolve_location(&file, || Ok(answer));

        assert!(matches!(result, Err(ConfigError::IoFailure { .. })));
        assert!(!file.path().exists());
    }
}
