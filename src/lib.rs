//! AndroidTBox config manager
//!
//! Keeps named snapshots of the AndroidTBox emulator configuration
//! (`%APPDATA%\AndroidTBox\TVM_100.xml`) in a user-chosen directory. Export
//! copies the active file into the store under a new name; import copies a
//! chosen snapshot back over the active file and restarts the emulator's
//! launcher so the change takes effect.
//!
//! The transfer core ([`store::ConfigStore`]) is plain filesystem code.
//! Prompting lives in [`console`], OS process handling behind the
//! [`process::ProcessControl`] trait, and [`controller::Session`] wires the
//! three together for one interactive run.

pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod process;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{ConfigError, Result};
