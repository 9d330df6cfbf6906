//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to
//! %APPDATA%\AndroidTBoxConfigManager\app.log. The console belongs to the
//! interactive prompts, so nothing is logged there. Logs rotate on every start,
//! keeping the previous five sessions.

use crate::error::{ConfigError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (app.log.1 through app.log.5)
const MAX_LOG_FILES: u8 = 5;

/// Base name of the active log file
const LOG_FILENAME: &str = "app.log";

/// Initialize the logging system writing into `log_dir`
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
pub fn init_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir).map_err(ConfigError::io("create directory", log_dir))?;

    rotate_logs_on_startup(&log_dir.join(LOG_FILENAME))?;

    // Rotation is handled above, once per run
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| ConfigError::Logging(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ConfigError::Logging(Box::new(e)))?;

    tracing::info!(
        "AndroidTBox config manager v{} started",
        env!("CARGO_PKG_VERSION")
    );

    Ok(())
}

/// Shift `app.log` → `app.log.1` → … → `app.log.5`, dropping the oldest
///
/// Called unconditionally on every start regardless of log size, so each
/// run's log stays separate.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| ConfigError::Logging(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| ConfigError::Logging(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log).map_err(ConfigError::io("remove", &oldest_log))?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)
                .map_err(ConfigError::io("rotate", &current_log))?;
        }
    }

    let log_1 = log_dir.join(format!("{log_name}.1"));
    std::fs::rename(log_path, &log_1).map_err(ConfigError::io("rotate", log_path))?;

    Ok(())
}
