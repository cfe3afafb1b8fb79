//! Shared fixture helpers for the integration tests.

use std::path::PathBuf;

/// Absolute path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// `fixture` as a `String`, for settings fields that hold paths.
#[allow(dead_code)]
pub fn fixture_str(name: &str) -> String {
    fixture(name).display().to_string()
}
