#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;
use tbox_config_manager::store::{Snapshot, snapshot_file_name, validate_name};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Accepted names must stay inside the store and list back under the same name
        if let Ok(name) = validate_name(s) {
            assert!(!name.contains(['/', '\\']));
            let file_name = snapshot_file_name(name);
            let snapshot = Snapshot::from_file_name(Path::new("store"), &file_name)
                .expect("exported file names always list as snapshots");
            assert_eq!(snapshot.name(), name);
        }

        // Directory entries may be anything; classification must not panic
        let _snapshot = Snapshot::from_file_name(Path::new("store"), s);
    }
});
