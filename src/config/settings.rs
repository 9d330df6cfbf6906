//! Optional user settings
//!
//! `settings.json` lets a user point the tool at a non-standard emulator
//! install. Every field has a default, so the file may be absent, partial or
//! empty (`{}`).

use crate::config::paths::AppPaths;
use crate::error::Result;
use crate::utils::atomic_file::write_atomic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Processes stopped after an import, in order
const DEFAULT_STOP_PROCESSES: [&str; 2] = ["AppMarket.exe", "AndroidEmulatorEx.exe"];

/// Pause after relaunching the launcher
const DEFAULT_SETTLE_DELAY_MS: u64 = 2000;

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSettings {
    /// Override for the active configuration file
    pub active_config: Option<PathBuf>,
    /// Post-import restart behaviour
    pub launcher: LauncherSettings,
}

/// How the emulator is restarted after an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Whether to stop and relaunch the emulator at all
    pub restart_enabled: bool,
    /// Override for the launcher executable
    pub market_exe: Option<PathBuf>,
    /// Image names stopped before relaunching
    pub stop_processes: Vec<String>,
    /// Milliseconds to wait after relaunching
    pub settle_delay_ms: u64,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            restart_enabled: true,
            market_exe: None,
            stop_processes: DEFAULT_STOP_PROCESSES.iter().map(ToString::to_string).collect(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl ManagerSettings {
    /// Load settings from `path`
    ///
    /// If the file doesn't exist the defaults are written there as a template
    /// to edit, and returned. A corrupt file is left alone and also yields the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Settings file not found, writing defaults to {:?}", path);
            let settings = Self::default();
            if let Err(e) = settings.save(path) {
                warn!("Failed to write default settings: {}", e);
            }
            return Ok(settings);
        }

        let json = std::fs::read_to_string(path)
            .map_err(crate::error::ConfigError::io("read settings from", path))?;

        match serde_json::from_str(&json) {
            Ok(settings) => {
                info!("Settings loaded from {:?}", path);
                Ok(settings)
            }
            Err(e) => {
                warn!("Failed to parse settings, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    /// Save settings to `path` with an atomic write
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())?;
        info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Active configuration path, honouring the override
    pub fn active_config_path(&self, paths: &AppPaths) -> PathBuf {
        self.active_config
            .clone()
            .unwrap_or_else(|| paths.default_active_config())
    }
}

impl LauncherSettings {
    /// Launcher executable, honouring the override
    pub fn market_exe_path(&self, paths: &AppPaths) -> PathBuf {
        self.market_exe
            .clone()
            .unwrap_or_else(|| paths.default_market_exe())
    }

    /// Settle delay as a `Duration`
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
