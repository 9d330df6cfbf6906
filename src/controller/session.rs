//! One interactive run of the config manager
//!
//! A [`Session`] resolves the store location, asks whether to import or
//! export, performs the transfer and, after an import, restarts the emulator.
//! It assumes elevation has already been handled by the caller.

use crate::config::{AppPaths, LocationFile, ManagerSettings, resolve_location};
use crate::console::{Action, Console};
use crate::error::{ConfigError, MissingItem, Result};
use crate::process::{ProcessControl, RestartReport, restart_emulator};
use crate::store::ConfigStore;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The active configuration was saved to this snapshot path
    Exported(PathBuf),
    /// The named snapshot replaced the active configuration
    Imported {
        /// Snapshot name without extension
        snapshot: String,
        /// Emulator restart result, `None` when restarting is disabled
        restart: Option<RestartReport>,
    },
}

/// Interactive session wiring the store, the console and process control
pub struct Session<'a, R, W> {
    paths: AppPaths,
    settings: ManagerSettings,
    console: Console<R, W>,
    control: &'a dyn ProcessControl,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Create a session
    pub fn new(
        paths: AppPaths,
        settings: ManagerSettings,
        console: Console<R, W>,
        control: &'a dyn ProcessControl,
    ) -> Self {
        Self {
            paths,
            settings,
            console,
            control,
        }
    }

    /// Perform one export or import
    pub fn run(&mut self) -> Result<Outcome> {
        let location_file = LocationFile::from_paths(&self.paths);
        let console = &mut self.console;
        let location = resolve_location(&location_file, || console.prompt_store_dir())?;
        info!("Store location: {:?}", location);

        let mut store = ConfigStore::new(location, self.settings.active_config_path(&self.paths));

        match self.console.choose_action()? {
            Action::Export => self.export(&store),
            Action::Import => self.import(&mut store),
        }
    }

    /// Report the result of [`run`](Session::run), wait for a key and pick the exit code
    pub fn finish(&mut self, result: &Result<Outcome>) -> ExitCode {
        let rendered = match result {
            Ok(Outcome::Exported(_)) => self
                .console
                .wait_for_key("Done! Press Enter to turn off window"),
            Ok(Outcome::Imported {
                snapshot,
                restart: None,
            }) => self
                .console
                .line(&format!("\nConfig '{snapshot}' imported."))
                .and_then(|()| {
                    self.console
                        .wait_for_key("Done! Press Enter to turn off window")
                }),
            Ok(Outcome::Imported { .. }) => self
                .console
                .line("\n\nWait a moment to reset GameLoop")
                .and_then(|()| {
                    self.console
                        .wait_for_key("(You can close the window by pressing any key)")
                }),
            Err(e) => {
                error!("Run failed: {}", e);
                self.console
                    .show_error(e)
                    .and_then(|()| self.console.wait_for_key("Press Enter to exit..."))
            }
        };

        if let Err(e) = rendered {
            warn!("Console unavailable while finishing: {}", e);
        }

        if result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// Consume the session and return its console
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn export(&mut self, store: &ConfigStore) -> Result<Outcome> {
        let name = self.console.prompt_snapshot_name()?;
        let path = store.export(&name)?;
        Ok(Outcome::Exported(path))
    }

    fn import(&mut self, store: &mut ConfigStore) -> Result<Outcome> {
        let snapshots = store.list_snapshots()?;
        if snapshots.is_empty() {
            return Err(ConfigError::NotFound {
                item: MissingItem::Snapshots,
                path: store.location().to_path_buf(),
            });
        }

        self.console.show_snapshots(snapshots)?;
        let selection = self.console.choose_snapshot(snapshots.len())?;
        let snapshot = store.import(selection)?.name().to_string();

        let restart = if self.settings.launcher.restart_enabled {
            Some(self.restart()?)
        } else {
            info!("Emulator restart disabled in settings");
            None
        };

        Ok(Outcome::Imported { snapshot, restart })
    }

    fn restart(&mut self) -> Result<RestartReport> {
        let launcher = &self.settings.launcher;
        let market_exe = launcher.market_exe_path(&self.paths);
        let launcher_name = market_exe.file_name().map_or_else(
            || market_exe.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

        self.console
            .line(&format!("\nShutting down GameLoop ({launcher_name}) if running..."))?;
        let report = restart_emulator(self.control, &launcher.stop_processes, &market_exe);
        self.console.show_restart(&report, &launcher_name)?;

        std::thread::sleep(launcher.settle_delay());
        Ok(report)
    }
}
