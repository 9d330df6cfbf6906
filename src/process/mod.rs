//! External process control
//!
//! The config transfer itself never touches processes. Elevation at startup
//! and the post-import emulator restart go through the [`ProcessControl`]
//! trait so they can be replaced by a fake in tests.

pub mod restart;
pub mod system;

pub use restart::{RestartReport, restart_emulator};
pub use system::SystemProcessControl;

use crate::error::Result;
use std::path::Path;
use tracing::info;

/// OS-level capabilities needed around a config transfer
pub trait ProcessControl {
    /// Whether the current process runs with administrator rights
    fn is_elevated(&self) -> Result<bool>;

    /// Start a new elevated copy of the current executable with the same arguments
    fn relaunch_elevated(&self) -> Result<()>;

    /// Terminate every process whose image name matches `image_name`
    ///
    /// Returns whether any matching process was found.
    fn stop_if_running(&self, image_name: &str) -> Result<bool>;

    /// Launch `executable` detached from this console
    fn start(&self, executable: &Path) -> Result<()>;
}

/// Outcome of the startup privilege check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    /// Already elevated, carry on
    AlreadyElevated,
    /// An elevated copy was started, this instance should exit
    Relaunched,
}

/// Relaunch elevated unless already running elevated
pub fn elevate_if_needed(control: &dyn ProcessControl) -> Result<Elevation> {
    if control.is_elevated()? {
        return Ok(Elevation::AlreadyElevated);
    }

    info!("Not elevated, relaunching with administrator privileges");
    control.relaunch_elevated()?;
    Ok(Elevation::Relaunched)
}

/// Normalize an image name or path for case-insensitive matching
///
/// Examples:
/// - "C:\\Program Files\\TxGameAssistant\\AppMarket\\AppMarket.exe" -> "appmarket"
/// - "AndroidEmulatorEx.exe" -> "androidemulatorex"
/// - "APPMARKET.EXE" -> "appmarket"
pub fn normalize_image_name(path: &str) -> String {
    let filename = path.rsplit(['\\', '/']).next().unwrap_or(path);

    let name_without_ext = match filename.rfind('.') {
        Some(pos) if pos > 0 => &filename[..pos],
        _ => filename,
    };

    name_without_ext.to_lowercase()
}
