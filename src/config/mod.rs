//! Configuration management module
//!
//! Covers the tool's own state under %APPDATA%\AndroidTBoxConfigManager: the
//! remembered store location (`config_dir.txt`) and optional overrides
//! (`settings.json`), plus the well-known paths derived from the environment.

pub mod location;
pub mod paths;
pub mod settings;

pub use location::{LocationFile, resolve_location};
pub use paths::AppPaths;
pub use settings::{LauncherSettings, ManagerSettings};
