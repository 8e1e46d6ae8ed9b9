#![allow(dead_code)]

use std::{fs, path::PathBuf, sync::Once};

use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Four participants: two visible rated ones, a hidden one and a freshman,
/// with bouts on three days.
pub const EPEE_FILE: &str = "\
# Parameters

minimum weighting freshman\t2.0

====================================================
# Initial ratings

Anna\t\t1700
Bert\t\t1600
(Carl)\t\t1500    # plays incognito
Dora\t\t0

====================================================
# Bouts

2024/03/01\tAnna -- Bert\t\t5:3
2024/03/01\tBert -- Carl\t\t5:4
2024/03/01.5\tDora -- Anna\t\t5:2

2024/03/08\tCarl -- Anna\t\t5:1
2024/03/08\tDora -- Bert\t\t5:3

2024/03/15\tAnna -- Bert\t\t15:12
";

/// Writes `text` to `name` in a fresh temporary directory. The directory
/// lives as long as the returned guard.
pub fn write_temp_file(name: &str, text: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    let path = dir.path().join(name);
    fs::write(&path, text).expect("Failed to write temporary Felo file");

    (dir, path)
}
