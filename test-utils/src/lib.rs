//! Shared test utilities for the asterix workspace: fixture loading and
//! scratch-file helpers used by integration tests across crates.

use std::fs;
use std::path::PathBuf;

/// Returns the path to the workspace-level testdata directory.
///
/// This resolves the path relative to the workspace root, not the
/// individual crate.
pub fn testdata_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let candidates = [
        manifest_dir.join("../testdata"),
        manifest_dir.join("../../testdata"),
        manifest_dir.join("testdata"),
    ];

    for candidate in &candidates {
        if candidate.exists() {
            return candidate.canonicalize().unwrap_or_else(|_| candidate.clone());
        }
    }

    manifest_dir.join("../testdata")
}

/// Returns the path to a fixture file.
///
/// # Arguments
///
/// * `category` - "valid" or "invalid"
/// * `filename` - Name of the XML file (e.g., "cat048.xml")
pub fn fixture_path(category: &str, filename: &str) -> PathBuf {
    testdata_dir().join(category).join(filename)
}

/// Loads an XML fixture file from the testdata directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(category: &str, filename: &str) -> String {
    let path = fixture_path(category, filename);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().to_path_buf()
}

/// Creates a temporary test file and returns its path. Files are created
/// under the workspace's `target/test_temp/` directory.
pub fn create_temp_file(content: &str, extension: &str) -> PathBuf {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::io::Write;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let temp_dir = workspace_root().join("target").join("test_temp");
    fs::create_dir_all(&temp_dir).expect("Failed to create temp dir");

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

    let thread_id = std::thread::current().id();
    let mut hasher = DefaultHasher::new();
    thread_id.hash(&mut hasher);
    let thread_hash = hasher.finish();

    let filename = format!("test_{}_{}_{:x}_{}.{}", std::process::id(), counter, thread_hash, timestamp, extension);
    let path = temp_dir.join(filename);

    let mut file = fs::File::create(&path).expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write temp file");

    path
}

/// Cleans up temporary test files left under `target/test_temp/`.
pub fn cleanup_temp_files() {
    let temp_dir = workspace_root().join("target").join("test_temp");
    if temp_dir.exists() {
        fs::remove_dir_all(temp_dir).ok();
    }
}
