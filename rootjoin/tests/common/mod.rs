//! Common test utilities for integration tests.
//!
//! This module provides a builder for real directory trees containing
//! symbolic links, rooted in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory with a `root/` inside it to confine paths to.
///
/// Entries are created relative to `root/`; the parent directory is left
/// free for "outside" targets.
#[allow(dead_code)]
pub struct RootFixture {
    temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl RootFixture {
    /// Creates an empty root.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("root");
        fs::create_dir(&root).unwrap();
        Self { temp, root }
    }

    /// The confinement root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory containing the root; not reachable from inside it.
    pub fn outside(&self) -> &Path {
        self.temp.path()
    }

    /// Creates a directory (and its parents) under the root.
    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.root.join(relative)).unwrap();
        self
    }

    /// Creates a file (and its parents) under the root.
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    /// Creates a symlink under the root storing `target` verbatim.
    #[cfg(unix)]
    pub fn symlink(self, relative: &str, target: impl AsRef<Path>) -> Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        std::os::unix::fs::symlink(target, path).unwrap();
        self
    }

    /// The expected resolution of `relative` under the root.
    pub fn expect(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}
