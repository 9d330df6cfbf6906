//! AndroidTBox config manager
//!
//! Console tool that exports the emulator's active configuration to a named
//! snapshot or imports a snapshot back and restarts GameLoop. Must run
//! elevated; relaunches itself through UAC when it is not.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tbox_config_manager::{
    config::{AppPaths, ManagerSettings},
    console::Console,
    controller::Session,
    error::ConfigError,
    process::{Elevation, SystemProcessControl, elevate_if_needed},
    utils,
};
use tracing::{error, info};

fn main() -> Result<ExitCode> {
    let paths = AppPaths::from_env();
    utils::init_logging(&paths.log_dir()).context("Failed to initialize logging system")?;

    let control = SystemProcessControl::new();

    match elevate_if_needed(&control) {
        Ok(Elevation::AlreadyElevated) => info!("Running with administrator privileges"),
        Ok(Elevation::Relaunched) => {
            println!("Requesting administrator privileges...");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => return Ok(fail_before_session(&e)),
    }

    let _single_instance_guard = match utils::SingleInstanceGuard::new() {
        Ok(guard) => guard,
        Err(e) => return Ok(fail_before_session(&e)),
    };

    let settings = match ManagerSettings::load(&paths.settings_file()) {
        Ok(settings) => settings,
        Err(e) => return Ok(fail_before_session(&e)),
    };

    let mut session = Session::new(paths, settings, Console::stdio(), &control);
    let result = session.run();
    if let Ok(outcome) = &result {
        info!("Run finished: {:?}", outcome);
    }

    Ok(session.finish(&result))
}

/// Show `error` on the console, wait for a key and report failure
fn fail_before_session(error: &ConfigError) -> ExitCode {
    error!("Startup failed: {}", error);

    let mut console = Console::stdio();
    let shown = console
        .show_error(error)
        .and_then(|()| console.wait_for_key("Press Enter to exit..."));
    if let Err(e) = shown {
        eprintln!("{e}");
    }

    ExitCode::FAILURE
}
