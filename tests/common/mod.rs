//! Fixture trees with known sizes

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

pub const DAY: Duration = Duration::from_secs(86_400);

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Root of the fixture, canonicalized the same way a scan reports it.
    pub fn root(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).expect("Failed to canonicalize temp dir")
    }

    pub fn add_dir(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    pub fn add_file(&self, rel: &str, size: usize) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, vec![b'x'; size]).expect("Failed to write file");
        path
    }

    /// Backdate a file's modification time by `age`.
    pub fn age_file(&self, path: &Path, age: Duration) {
        let file = fs::OpenOptions::new()
            .write(true)
            .open(path)
            .expect("Failed to open file");
        file.set_modified(SystemTime::now() - age)
            .expect("Failed to set mtime");
    }
}

/// root/
///   readme.md          13
///   src/main.rs      1024
///   src/lib.rs        512
///   src/util/mod.rs   256
///   assets/logo.PNG  2048
///   assets/Makefile   100
///   empty/
pub fn simple_tree() -> Fixture {
    let fixture = Fixture::new();
    fixture.add_file("readme.md", 13);
    fixture.add_file("src/main.rs", 1024);
    fixture.add_file("src/lib.rs", 512);
    fixture.add_file("src/util/mod.rs", 256);
    fixture.add_file("assets/logo.PNG", 2048);
    fixture.add_file("assets/Makefile", 100);
    fixture.add_dir("empty");
    fixture
}

pub const SIMPLE_TREE_BYTES: u64 = 13 + 1024 + 512 + 256 + 2048 + 100;
