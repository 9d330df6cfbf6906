//! Error types for the AndroidTBox config manager
//!
//! All failures of a run end up as a [`ConfigError`]. Every variant is terminal
//! for the current run except `Process` errors raised while restarting the
//! emulator after a successful import, which are only logged.
//!
//! Variants that wrap another error use `#[source]` so the chain survives
//! into the log file.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Which piece of user input was empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// Store directory asked for on first run
    StoreDirectory,
    /// Snapshot name asked for on export
    SnapshotName,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreDirectory => f.write_str("store directory"),
            Self::SnapshotName => f.write_str("config name"),
        }
    }
}

/// What could not be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingItem {
    /// The active configuration file read by the emulator
    ActiveConfig,
    /// Any snapshot at all in the store directory
    Snapshots,
    /// A listed snapshot that vanished before it could be imported
    Snapshot,
}

impl fmt::Display for MissingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveConfig => f.write_str("Active configuration not found"),
            Self::Snapshots => f.write_str("No config files found in"),
            Self::Snapshot => f.write_str("Config file no longer exists"),
        }
    }
}

/// Main error type for the config manager
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required user input was blank
    #[error("No {0} entered")]
    EmptyInput(InputField),

    /// Snapshot name would escape the store directory
    #[error("Invalid config name '{0}': names cannot contain path separators")]
    InvalidName(String),

    /// A required file or store content does not exist
    #[error("{item} '{}'", path.display())]
    NotFound {
        /// What was missing
        item: MissingItem,
        /// Where it was looked for
        path: PathBuf,
    },

    /// Selection outside `[1, count]`
    #[error("Invalid selection {selection}: expected a number between 1 and {count}")]
    InvalidSelection {
        /// The 1-based index that was requested
        selection: usize,
        /// How many snapshots the last listing produced
        count: usize,
    },

    /// Copy, delete, create or read failure
    #[error("Failed to {action} '{}': {source}", path.display())]
    IoFailure {
        /// Short verb phrase describing the operation
        action: &'static str,
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stopping or starting an external process failed
    /// Preserves the underlying error source for full error chain transparency
    #[error("Process control error: {0}")]
    Process(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Checking or requesting administrator privileges failed
    #[error("Elevation error: {0}")]
    Elevation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Another instance holds the single-instance mutex
    #[error("Another instance of the config manager is already running")]
    AlreadyRunning,

    /// The single-instance lock could not be created
    #[error("Failed to create the run lock: {0}")]
    InstanceLock(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ConfigError {
    /// Build a `map_err` adapter that wraps an `io::Error` with its action and path
    pub fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::IoFailure {
            action,
            path,
            source,
        }
    }
}

/// Result type alias for config manager operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Convert an error to a user-friendly message
///
/// The returned text is printed to the console after `[ERROR]` and includes
/// hints for the common causes of each failure.
pub fn get_user_friendly_error(error: &ConfigError) -> String {
    match error {
        ConfigError::EmptyInput(InputField::StoreDirectory) => {
            "No directory entered. Exiting...".to_string()
        }
        ConfigError::EmptyInput(InputField::SnapshotName) => {
            "Config name cannot be empty.".to_string()
        }
        ConfigError::InvalidName(name) => {
            format!(
                "'{name}' is not a valid config name.\n\
                 Use a plain name without '/' or '\\'."
            )
        }
        ConfigError::NotFound {
            item: MissingItem::ActiveConfig,
            path,
        } => {
            format!(
                "'{}' not found!\n\n\
                 Start AndroidTBox at least once so it writes its configuration.",
                path.display()
            )
        }
        ConfigError::NotFound { item, path } => format!("{item} '{}'", path.display()),
        ConfigError::InvalidSelection { count, .. } => {
            format!("Invalid selection. Enter a number between 1 and {count}.")
        }
        ConfigError::IoFailure {
            action,
            path,
            source,
        } => {
            format!(
                "Failed to {action} '{}': {source}\n\n\
                 If AndroidTBox is running it may be holding the file open.\n\
                 Please check file permissions and disk space.",
                path.display()
            )
        }
        ConfigError::Json(e) => format!("Could not write settings.json: {e}"),
        ConfigError::Process(e) => format!("Could not control the GameLoop processes: {e}"),
        ConfigError::Elevation(e) => {
            format!(
                "Administrator privileges are required:\n\n{e}\n\n\
                 Accept the UAC prompt or run the program as administrator."
            )
        }
        ConfigError::AlreadyRunning => "Another config manager window is already open.\n\
             Finish or close it before starting a new one."
            .to_string(),
        ConfigError::InstanceLock(e) => {
            format!("Could not check for another running config manager: {e}")
        }
        ConfigError::Logging(e) => format!("Could not set up logging: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ConfigError::EmptyInput(InputField::SnapshotName);
        assert_eq!(error.to_string(), "No config name entered");
    }

    #[test]
    fn test_not_found_display() {
        let error = ConfigError::NotFound {
            item: MissingItem::Snapshots,
            path: PathBuf::from("configs"),
        };
        assert_eq!(error.to_string(), "No config files found in 'configs'");
    }

    #[test]
    fn test_invalid_selection_display() {
        let error = ConfigError::InvalidSelection {
            selection: 7,
            count: 3,
        };
        assert_eq!(
            error.to_string(),
            "Invalid selection 7: expected a number between 1 and 3"
        );
    }

    #[test]
    fn test_io_adapter_keeps_source() {
        use std::error::Error;

        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        let error = ConfigError::io("copy config to", "TVM_100.xml")(io_error);

        assert!(matches!(error, ConfigError::IoFailure { action: "copy config to", .. }));
        assert_eq!(error.source().map(ToString::to_string).as_deref(), Some("locked"));
        assert_eq!(error.to_string(), "Failed to copy config to 'TVM_100.xml': locked");
    }

    #[test]
    fn test_user_friendly_messages() {
        let error = ConfigError::EmptyInput(InputField::StoreDirectory);
        assert_eq!(
            get_user_friendly_error(&error),
            "No directory entered. Exiting..."
        );

        let error = ConfigError::NotFound {
            item: MissingItem::ActiveConfig,
            path: PathBuf::from("TVM_100.xml"),
        };
        let message = get_user_friendly_error(&error);
        assert!(message.contains("'TVM_100.xml' not found!"));
    }

    #[test]
    fn test_user_friendly_io_mentions_lock() {
        let error = ConfigError::IoFailure {
            action: "remove",
            path: PathBuf::from("TVM_100.xml"),
            source: std::io::Error::other("sharing violation"),
        };
        let message = get_user_friendly_error(&error);
        assert!(message.contains("sharing violation"));
        assert!(message.contains("holding the file open"));
    }

    #[test]
    fn test_instance_lock_is_not_a_process_error() {
        let error = ConfigError::InstanceLock(StringError::new("access denied"));
        assert_eq!(
            error.to_string(),
            "Failed to create the run lock: access denied"
        );
        assert!(get_user_friendly_error(&error).contains("another running config manager"));
    }
}
