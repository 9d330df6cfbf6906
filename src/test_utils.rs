#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify process environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Create a temporary test directory that is removed when dropped
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// RAII guard that overrides environment variables for a test scope
/// and restores the original values when dropped.
///
/// The `ENV_LOCK` mutex is held for the guard's whole lifetime, so tests
/// using it never modify the environment concurrently.
pub struct EnvGuard {
    originals: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables while holding ENV_LOCK"
)]
impl EnvGuard {
    /// Set (`Some`) or remove (`None`) each variable until the guard is dropped
    pub fn new(vars: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let originals = vars
            .iter()
            .map(|(key, _)| (*key, std::env::var(key).ok()))
            .collect();

        for (key, value) in vars {
            // SAFETY: ENV_LOCK is held, so no other test reads or writes the
            // environment through this guard concurrently.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }

        Self {
            originals,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables while holding ENV_LOCK"
)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original) in &self.originals {
            // SAFETY: the lock is still held; restores the state seen in `new`.
            unsafe {
                match original {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
