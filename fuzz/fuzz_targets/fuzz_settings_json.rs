#![no_main]

use libfuzzer_sys::fuzz_target;
use tbox_config_manager::config::ManagerSettings;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the settings parser
    if let Ok(s) = std::str::from_utf8(data) {
        let _result: Result<ManagerSettings, _> = serde_json::from_str(s);
    }
});
