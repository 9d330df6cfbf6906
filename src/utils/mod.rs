//! Utility modules
//!
//! Provides atomic file writes, logging and single instance enforcement.

pub mod atomic_file;
pub mod logging;
pub mod single_instance;

pub use atomic_file::write_atomic;
pub use logging::init_logging;
pub use single_instance::SingleInstanceGuard;
