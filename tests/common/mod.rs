//! Shared scaffolding for integration tests: builds small file trees under a
//! `TempDir` so each test can exercise the full `session::search` path
//! against real filesystem state.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// A `(relative_path, contents)` pair describing one file to create.
pub struct FileSpec {
    pub path: &'static str,
    pub contents: &'static [u8],
}

#[must_use]
pub fn spec(path: &'static str, contents: &'static [u8]) -> FileSpec {
    FileSpec { path, contents }
}

/// Creates a `TempDir` and populates it with `files`, creating parent
/// directories as needed.
pub fn build_tree(files: &[FileSpec]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for file in files {
        let full_path = dir.path().join(file.path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&full_path, file.contents).expect("write file");
    }
    dir
}

/// Backdates a file's mtime by `age` relative to now, for time-window tests.
pub fn set_mtime_ago(path: &Path, age: Duration) {
    let target = SystemTime::now() - age;
    let file = File::open(path).expect("open file to backdate");
    file.set_modified(target).expect("set mtime");
}
