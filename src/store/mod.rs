//! Snapshot store
//!
//! A [`ConfigStore`] mediates between the emulator's active configuration
//! file and a user-chosen directory of named `.xml` snapshots. Files are
//! treated as opaque bytes.

pub mod config_store;
pub mod snapshot;

pub use config_store::ConfigStore;
pub use snapshot::{SNAPSHOT_EXTENSION, Snapshot, snapshot_file_name, validate_name};
