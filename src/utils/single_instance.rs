//! One manager at a time
//!
//! Import deletes and rewrites `TVM_100.xml`; two managers doing that at once
//! could leave the emulator without a config. A named mutex owned for the whole
//! run keeps a second window out. Outside Windows there is nothing to guard.

use crate::error::Result;

/// Mutex name, scoped to the logon session
#[cfg(windows)]
const LOCK_NAME: &str = r"Local\AndroidTBoxConfigManager.Run";

/// Held for the lifetime of a run; dropping it lets the next instance in
#[derive(Debug)]
pub struct SingleInstanceGuard {
    #[cfg(windows)]
    mutex: windows::Win32::Foundation::HANDLE,
}

impl SingleInstanceGuard {
    /// Take the run lock
    ///
    /// Fails with `AlreadyRunning` when another manager holds it.
    ///
    /// # Safety
    ///
    /// `CreateMutexW` gets an owned `HSTRING` that outlives the call, and
    /// `GetLastError` is read before any other API call can overwrite it. A
    /// handle to an already existing mutex is closed before returning.
    #[cfg(windows)]
    #[expect(
        unsafe_code,
        reason = "Windows FFI for CreateMutexW, GetLastError and CloseHandle"
    )]
    pub fn new() -> Result<Self> {
        use crate::error::ConfigError;
        use tracing::{debug, warn};
        use windows::Win32::Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError};
        use windows::Win32::System::Threading::CreateMutexW;
        use windows::core::HSTRING;

        let name = HSTRING::from(LOCK_NAME);
        let (mutex, last_error) = unsafe {
            let mutex = CreateMutexW(None, true, &name)
                .map_err(|e| ConfigError::InstanceLock(Box::new(e)))?;
            (mutex, GetLastError())
        };

        if last_error == ERROR_ALREADY_EXISTS {
            warn!("Run lock {} is held by another instance", LOCK_NAME);
            unsafe {
                let _ = CloseHandle(mutex);
            }
            return Err(ConfigError::AlreadyRunning);
        }

        debug!("Acquired run lock {}", LOCK_NAME);
        Ok(Self { mutex })
    }

    /// Take the run lock (always succeeds outside Windows)
    #[cfg(not(windows))]
    pub fn new() -> Result<Self> {
        Ok(Self {})
    }
}

#[cfg(windows)]
impl Drop for SingleInstanceGuard {
    #[expect(unsafe_code, reason = "Windows FFI for CloseHandle")]
    fn drop(&mut self) {
        unsafe {
            let _ = windows::Win32::Foundation::CloseHandle(self.mutex);
        }
        tracing::debug!("Released run lock");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(windows)]
    fn test_second_guard_is_refused_until_first_drops() {
        use crate::error::ConfigError;

        let first = SingleInstanceGuard::new().unwrap();
        assert!(matches!(
            SingleInstanceGuard::new(),
            Err(ConfigError::AlreadyRunning)
        ));

        drop(first);
        assert!(SingleInstanceGuard::new().is_ok());
    }

    #[test]
    #[cfg(not(windows))]
    fn test_guard_is_free_outside_windows() {
        let first = SingleInstanceGuard::new().unwrap();
        let second = SingleInstanceGuard::new().unwrap();
        drop((first, second));
    }
}
