//! Assertion helpers for download directories

use std::fs;
use std::path::Path;

/// Names of the entries in a directory, sorted
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to read '{}': {}", dir.display(), e))
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Assert that a directory contains no entries
pub fn assert_dir_empty(dir: &Path) {
    let entries = dir_entries(dir);
    assert!(
        entries.is_empty(),
        "Expected '{}' to be empty but found: {:?}",
        dir.display(),
        entries
    );
}

/// Assert that no artifact or part file exists for a path
pub fn assert_no_artifact(path: &Path) {
    assert!(!path.exists(), "Expected no file at '{}'", path.display());

    let part = apkwatch_update::download::part_path(path);
    assert!(
        !part.exists(),
        "Expected partial file '{}' to be cleaned up",
        part.display()
    );
}

/// Assert that a file exists with exactly the expected content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let actual = fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read '{}': {}", path.display(), e));
    assert_eq!(
        actual,
        expected,
        "Unexpected content in '{}'",
        path.display()
    );
}

/// Assert that an error message contains the expected pattern
pub fn assert_error_contains<T: std::fmt::Debug, E: std::fmt::Display>(
    result: &Result<T, E>,
    pattern: &str,
) {
    assert!(result.is_err(), "Expected error but got Ok");
    let error_msg = result.as_ref().unwrap_err().to_string();
    assert!(
        error_msg.contains(pattern),
        "Expected error containing '{}' but got: {}",
        pattern,
        error_msg
    );
}
