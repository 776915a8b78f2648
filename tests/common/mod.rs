#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use revenue_core::{
    config::{ConfigManager, ReportConfig},
    records::RawRecord,
    storage::JsonRecordFile,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const LOCATIONS: [&str; 3] = ["Altstadt", "Hafen", "Bahnhof"];

pub fn sample_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("Altstadt", "15.03.2024", 100.0),
        RawRecord::new("Altstadt", "20.03.2024", 50.0),
        RawRecord::new("Hafen", "01.01.2024", 10.0),
        RawRecord::new("Hafen", "31.13.2024", 1_000_000.0),
        RawRecord::new("Altstadt", "02.11.2023", 25.25),
        RawRecord::new("Bahnhof", "29.02.2024", 80.5),
    ]
}

/// Writes a config and transaction log into an isolated directory; returns the base dir.
pub fn setup_test_env() -> (PathBuf, ConfigManager, JsonRecordFile) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let manager = ConfigManager::with_base_dir(base.clone()).expect("create config manager");
    let mut config = ReportConfig::with_locations(LOCATIONS);
    config.records_file = Some(PathBuf::from("records.json"));
    manager.save(&config).expect("save config");

    let records = JsonRecordFile::new(base.join("records.json"));
    records.save(&sample_records()).expect("save records");

    (base, manager, records)
}
