//! Real process control backed by the Windows API
//!
//! Process lookup walks a Toolhelp32 snapshot and matches image names
//! case-insensitively without extension. Elevation uses the process token and
//! the `runas` shell verb. Launching uses `std::process::Command` on every
//! platform; the other operations report an error outside Windows.

use crate::error::{ConfigError, Result};
use crate::process::{ProcessControl, normalize_image_name};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

#[cfg(windows)]
use windows::Win32::Foundation::{CloseHandle, HANDLE};

/// Process control for the machine this tool runs on
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessControl;

impl SystemProcessControl {
    /// Create the system process controller
    pub fn new() -> Self {
        Self
    }
}

impl ProcessControl for SystemProcessControl {
    fn is_elevated(&self) -> Result<bool> {
        current_process_elevated()
    }

    fn relaunch_elevated(&self) -> Result<()> {
        let exe = std::env::current_exe().map_err(|e| ConfigError::Elevation(Box::new(e)))?;
        let args = quote_arguments(std::env::args_os().skip(1));
        shell_execute_runas(exe.as_os_str(), &args)?;
        info!("Launched elevated instance of {:?}", exe);
        Ok(())
    }

    fn stop_if_running(&self, image_name: &str) -> Result<bool> {
        let target = normalize_image_name(image_name);
        let pids = find_processes(&target)?;
        if pids.is_empty() {
            return Ok(false);
        }

        for pid in pids {
            terminate(pid)?;
            info!("Terminated {} (PID: {})", image_name, pid);
        }
        Ok(true)
    }

    fn start(&self, executable: &Path) -> Result<()> {
        let child = Command::new(executable)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ConfigError::Process(Box::new(e)))?;

        debug!("Spawned {:?} as PID {}", executable, child.id());
        Ok(())
    }
}

/// Join arguments into one command line, each wrapped in double quotes
fn quote_arguments<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.as_ref().to_string_lossy();
            format!("\"{}\"", arg.replace('"', "\\\""))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Query `TokenElevation` on the current process token
///
/// # Safety
///
/// The token handle comes from `OpenProcessToken` on the pseudo-handle of the
/// current process and is closed by `HandleGuard`. `TOKEN_ELEVATION` is a
/// plain `u32` wrapper and the buffer size passed matches it exactly.
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Windows FFI for OpenProcessToken and GetTokenInformation"
)]
fn current_process_elevated() -> Result<bool> {
    use windows::Win32::Security::{
        GetTokenInformation, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation,
    };
    use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    let mut token = HANDLE::default();
    unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &raw mut token) }
        .map_err(|e| ConfigError::Elevation(Box::new(e)))?;
    let _guard = HandleGuard(token);

    let mut elevation = TOKEN_ELEVATION::default();
    let mut returned = 0u32;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "size_of::<TOKEN_ELEVATION>() is a 4-byte compile-time constant"
    )]
    let size = std::mem::size_of::<TOKEN_ELEVATION>() as u32;

    unsafe {
        GetTokenInformation(
            token,
            TokenElevation,
            Some((&raw mut elevation).cast()),
            size,
            &raw mut returned,
        )
    }
    .map_err(|e| ConfigError::Elevation(Box::new(e)))?;

    debug!("Token elevation: {}", elevation.TokenIsElevated);
    Ok(elevation.TokenIsElevated != 0)
}

#[cfg(not(windows))]
fn current_process_elevated() -> Result<bool> {
    // No UAC outside Windows
    Ok(true)
}

/// Start `exe` through the shell with the `runas` verb (UAC prompt)
///
/// # Safety
///
/// Both strings are owned `HSTRING`s that outlive the call. `ShellExecuteW`
/// returns a pseudo-`HINSTANCE` whose value is > 32 on success.
#[cfg(windows)]
#[expect(unsafe_code, reason = "Windows FFI for ShellExecuteW with the runas verb")]
fn shell_execute_runas(exe: &OsStr, args: &str) -> Result<()> {
    use windows::Win32::UI::Shell::ShellExecuteW;
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
    use windows::core::{HSTRING, PCWSTR, w};

    let exe = HSTRING::from(exe);
    let args = HSTRING::from(args);

    let result = unsafe {
        ShellExecuteW(
            None,
            w!("runas"),
            &exe,
            &args,
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };

    let code = result.0 as usize;
    if code <= 32 {
        return Err(ConfigError::Elevation(crate::error::StringError::new(
            format!("ShellExecuteW failed with code {code}"),
        )));
    }
    Ok(())
}

#[cfg(not(windows))]
fn shell_execute_runas(_exe: &OsStr, _args: &str) -> Result<()> {
    Err(ConfigError::Elevation(crate::error::StringError::new(
        "Elevation is only supported on Windows",
    )))
}

/// PIDs of every other process whose normalized image name equals `target`
///
/// # Safety
///
/// `CreateToolhelp32Snapshot` called with valid flags (`TH32CS_SNAPPROCESS`, PID 0)
/// and its handle owned by `HandleGuard`. `PROCESSENTRY32W` initialized with the
/// correct `dwSize`. Return codes of `Process32FirstW`/`NextW` are checked before
/// the entry is read; any error ends the walk.
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Windows FFI for process enumeration via CreateToolhelp32Snapshot and Process32FirstW/NextW"
)]
fn find_processes(target: &str) -> Result<Vec<u32>> {
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    };

    let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
        .map_err(|e| ConfigError::Process(Box::new(e)))?;
    let _guard = HandleGuard(snapshot);

    let own_pid = std::process::id();
    let mut matches = Vec::new();

    #[expect(
        clippy::cast_possible_truncation,
        reason = "size_of::<PROCESSENTRY32W>() is a compile-time constant (568 bytes) that fits in u32"
    )]
    let mut entry = PROCESSENTRY32W {
        dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    let mut has_process = unsafe { Process32FirstW(snapshot, &raw mut entry) }.is_ok();
    while has_process {
        if entry.th32ProcessID != own_pid
            && let Some(name) = extract_process_name(&entry.szExeFile)
            && normalize_image_name(&name) == target
        {
            matches.push(entry.th32ProcessID);
        }
        has_process = unsafe { Process32NextW(snapshot, &raw mut entry) }.is_ok();
    }

    debug!("{} running process(es) match '{}'", matches.len(), target);
    Ok(matches)
}

#[cfg(not(windows))]
fn find_processes(_target: &str) -> Result<Vec<u32>> {
    Err(ConfigError::Process(crate::error::StringError::new(
        "Process control is only supported on Windows",
    )))
}

/// Forcefully terminate `pid`
///
/// # Safety
///
/// The handle from `OpenProcess` is checked before use and owned by
/// `HandleGuard`, which closes it exactly once.
#[cfg(windows)]
#[expect(unsafe_code, reason = "Windows FFI for OpenProcess and TerminateProcess")]
fn terminate(pid: u32) -> Result<()> {
    use windows::Win32::System::Threading::{OpenProcess, PROCESS_TERMINATE, TerminateProcess};

    let process = unsafe { OpenProcess(PROCESS_TERMINATE, false, pid) }
        .map_err(|e| ConfigError::Process(Box::new(e)))?;
    let _guard = HandleGuard(process);

    unsafe { TerminateProcess(process, 1) }.map_err(|e| ConfigError::Process(Box::new(e)))
}

#[cfg(not(windows))]
fn terminate(_pid: u32) -> Result<()> {
    Err(ConfigError::Process(crate::error::StringError::new(
        "Process control is only supported on Windows",
    )))
}

/// RAII guard closing a Windows handle
#[cfg(windows)]
struct HandleGuard(HANDLE);

#[cfg(windows)]
impl Drop for HandleGuard {
    #[expect(unsafe_code, reason = "Windows FFI for CloseHandle")]
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Convert the null-terminated `szExeFile` field to a `String`
#[cfg(windows)]
fn extract_process_name(sz_exe_file: &[u16; 260]) -> Option<String> {
    let len = sz_exe_file
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(sz_exe_file.len());

    String::from_utf16(&sz_exe_file[..len]).ok()
}
