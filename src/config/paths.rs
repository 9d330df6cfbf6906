//! Well-known filesystem locations
//!
//! Everything the tool touches hangs off two roots: the per-user `%APPDATA%`
//! directory and `%ProgramFiles%`. Resolving them once into an [`AppPaths`]
//! value keeps the rest of the crate free of environment lookups.

use std::path::{Path, PathBuf};

/// Folder under `%APPDATA%` holding this tool's own state
pub const STATE_DIR_NAME: &str = "AndroidTBoxConfigManager";

/// Side-file recording the chosen store directory
pub const LOCATION_FILENAME: &str = "config_dir.txt";

/// Optional JSON settings file
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Folder under `%APPDATA%` owned by the emulator
pub const EMULATOR_DIR_NAME: &str = "AndroidTBox";

/// File name of the configuration the emulator reads
pub const ACTIVE_CONFIG_FILENAME: &str = "TVM_100.xml";

/// Launcher executable relative to `%ProgramFiles%`
const MARKET_EXE_RELATIVE: [&str; 3] = ["TxGameAssistant", "AppMarket", "AppMarket.exe"];

/// Used when `%ProgramFiles%` is not set
const DEFAULT_PROGRAM_FILES: &str = r"C:\Program Files";

/// Resolved locations for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    appdata: PathBuf,
    program_files: PathBuf,
}

impl AppPaths {
    /// Resolve from the `APPDATA` and `ProgramFiles` environment variables
    ///
    /// Falls back to the current directory when `APPDATA` is missing.
    pub fn from_env() -> Self {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        let program_files = std::env::var("ProgramFiles")
            .unwrap_or_else(|_| DEFAULT_PROGRAM_FILES.to_string());
        Self::new(appdata, program_files)
    }

    /// Build from explicit roots
    pub fn new(appdata: impl Into<PathBuf>, program_files: impl Into<PathBuf>) -> Self {
        Self {
            appdata: appdata.into(),
            program_files: program_files.into(),
        }
    }

    /// `%APPDATA%`
    pub fn appdata(&self) -> &Path {
        &self.appdata
    }

    /// `%APPDATA%\AndroidTBoxConfigManager`
    pub fn state_dir(&self) -> PathBuf {
        self.appdata.join(STATE_DIR_NAME)
    }

    /// `%APPDATA%\AndroidTBoxConfigManager\config_dir.txt`
    pub fn location_file(&self) -> PathBuf {
        self.state_dir().join(LOCATION_FILENAME)
    }

    /// `%APPDATA%\AndroidTBoxConfigManager\settings.json`
    pub fn settings_file(&self) -> PathBuf {
        self.state_dir().join(SETTINGS_FILENAME)
    }

    /// Directory receiving `app.log` and its rotated predecessors
    pub fn log_dir(&self) -> PathBuf {
        self.state_dir()
    }

    /// `%APPDATA%\AndroidTBox\TVM_100.xml`
    pub fn default_active_config(&self) -> PathBuf {
        self.appdata
            .join(EMULATOR_DIR_NAME)
            .join(ACTIVE_CONFIG_FILENAME)
    }

    /// `%ProgramFiles%\TxGameAssistant\AppMarket\AppMarket.exe`
    pub fn default_market_exe(&self) -> PathBuf {
        MARKET_EXE_RELATIVE
            .iter()
            .fold(self.program_files.clone(), |path, part| path.join(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::EnvGuard;

    #[test]
    fn test_from_env_reads_roots() {
        let _guard = EnvGuard::new(&[
            ("APPDATA", Some("roaming")),
            ("ProgramFiles", Some("programs")),
        ]);

        assert_eq!(AppPaths::from_env(), AppPaths::new("roaming", "programs"));
    }

    #[test]
    fn test_from_env_fallbacks() {
        let _guard = EnvGuard::new(&[("APPDATA", None), ("ProgramFiles", None)]);

        let paths = AppPaths::from_env();
        assert_eq!(paths.appdata(), Path::new("."));
        assert_eq!(paths, AppPaths::new(".", r"C:\Program Files"));
    }

    #[test]
    fn test_state_files_live_under_state_dir() {
        let paths = AppPaths::new("roaming", "programs");
        let state_dir = Path::new("roaming").join("AndroidTBoxConfigManager");

        assert_eq!(paths.state_dir(), state_dir);
        assert_eq!(paths.location_file(), state_dir.join("config_dir.txt"));
        assert_eq!(paths.settings_file(), state_dir.join("settings.json"));
        assert_eq!(paths.log_dir(), state_dir);
    }

    #[test]
    fn test_emulator_locations() {
        let paths = AppPaths::new("roaming", "programs");

        assert_eq!(
            paths.default_active_config(),
            Path::new("roaming").join("AndroidTBox").join("TVM_100.xml")
        );
        assert_eq!(
            paths.default_market_exe(),
            Path::new("programs")
                .join("TxGameAssistant")
                .join("AppMarket")
                .join("AppMarket.exe")
        );
    }
}
