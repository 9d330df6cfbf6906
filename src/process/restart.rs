//! Post-import emulator restart
//!
//! After a snapshot is imported the launcher and the emulator helper are
//! stopped and the launcher is started again so it picks up the new file.
//! The transfer has already succeeded at this point, so every failure here is
//! logged and recorded in the report instead of being returned.

use crate::process::ProcessControl;
use std::path::Path;
use tracing::{info, warn};

/// What happened to each process during a restart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestartReport {
    /// Image names that were running and have been terminated
    pub stopped: Vec<String>,
    /// Image names that were not running
    pub not_running: Vec<String>,
    /// Whether the launcher was started again
    pub started: bool,
    /// Human-readable failures, in the order they happened
    pub warnings: Vec<String>,
}

impl RestartReport {
    /// True when every step succeeded
    pub fn is_clean(&self) -> bool {
        self.started && self.warnings.is_empty()
    }
}

/// Stop `stop_processes` in order, then start `launcher`
pub fn restart_emulator(
    control: &dyn ProcessControl,
    stop_processes: &[String],
    launcher: &Path,
) -> RestartReport {
    let mut report = RestartReport::default();

    for image_name in stop_processes {
        match control.stop_if_running(image_name) {
            Ok(true) => {
                info!("{} was running and has been terminated", image_name);
                report.stopped.push(image_name.clone());
            }
            Ok(false) => {
                info!("{} is not running", image_name);
                report.not_running.push(image_name.clone());
            }
            Err(e) => {
                warn!("Could not stop {}: {}", image_name, e);
                report
                    .warnings
                    .push(format!("Could not stop {image_name}: {e}"));
            }
        }
    }

    match control.start(launcher) {
        Ok(()) => {
            info!("Started {:?}", launcher);
            report.started = true;
        }
        Err(e) => {
            warn!("Could not start {:?}: {}", launcher, e);
            report
                .warnings
                .push(format!("Could not start {}: {e}", launcher.display()));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Result, StringError};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        running: Vec<&'static str>,
        failing: Vec<&'static str>,
        start_fails: bool,
        calls: RefCell<Vec<String>>,
    }

    impl ProcessControl for Recorder {
        fn is_elevated(&self) -> Result<bool> {
            Ok(true)
        }

        fn relaunch_elevated(&self) -> Result<()> {
            Ok(())
        }

        fn stop_if_running(&self, image_name: &str) -> Result<bool> {
            self.calls.borrow_mut().push(format!("stop {image_name}"));
            if self.failing.iter().any(|name| *name == image_name) {
                return Err(ConfigError::Process(StringError::new("access denied")));
            }
            Ok(self.running.iter().any(|name| *name == image_name))
        }

        fn start(&self, executable: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("start {}", executable.display()));
            if self.start_fails {
                return Err(ConfigError::Process(StringError::new("not found")));
            }
            Ok(())
        }
    }

    fn targets() -> Vec<String> {
        vec!["AppMarket.exe".to_string(), "AndroidEmulatorEx.exe".to_string()]
    }

    #[test]
    fn test_stops_in_order_then_starts() {
        let control = Recorder {
            running: vec!["AppMarket.exe"],
            ..Recorder::default()
        };

        let report = restart_emulator(&control, &targets(), Path::new("AppMarket.exe"));

        assert_eq!(
            *control.calls.borrow(),
            vec![
                "stop AppMarket.exe",
                "stop AndroidEmulatorEx.exe",
                "start AppMarket.exe"
            ]
        );
        assert_eq!(report.stopped, vec!["AppMarket.exe"]);
        assert_eq!(report.not_running, vec!["AndroidEmulatorEx.exe"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_failures_are_collected_not_fatal() {
        let control = Recorder {
            failing: vec!["AppMarket.exe"],
            start_fails: true,
            ..Recorder::default()
        };

        let report = restart_emulator(&control, &targets(), Path::new("AppMarket.exe"));

        // Later steps still run after an earlier failure
        assert_eq!(control.calls.borrow().len(), 3);
        assert!(!report.started);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("access denied"));
        assert!(!report.is_clean());
    }
}
