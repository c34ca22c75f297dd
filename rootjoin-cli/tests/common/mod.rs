//! Common test utilities for CLI integration tests.
//!
//! This module provides an isolated environment per test: a temporary
//! directory holding a confinement root, a user config directory, and a
//! working directory for project config discovery.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated config and root directories.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// The confinement root, `<temp>/root`.
    pub root: PathBuf,
    /// The user config directory, `<temp>/config`.
    pub config_dir: PathBuf,
    /// Working directory for commands, `<temp>/work`.
    pub work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with empty root and work directories.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let root = base.join("root");
        let config_dir = base.join("config");
        let work_dir = base.join("work");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        fs::create_dir_all(&work_dir).unwrap();

        Self {
            temp_dir,
            root,
            config_dir,
            work_dir,
        }
    }

    /// A command with no inherited `ROOTJOIN_*` variables, run from the
    /// work directory with this environment's config directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("rootjoin").expect("Failed to find rootjoin binary");
        for var in [
            "ROOTJOIN_ROOT",
            "ROOTJOIN_DEFAULT_ROOT",
            "ROOTJOIN_ROOTS",
            "ROOTJOIN_LOG_MODE",
            "ROOTJOIN_CONFIG_DIR",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.work_dir)
            .arg("--config-dir")
            .arg(&self.config_dir);
        cmd
    }

    /// A `join` command against this environment's root.
    pub fn join(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("join").arg("--root").arg(&self.root);
        cmd
    }

    /// Write the user config file.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        let path = self.config_dir.join("config.yaml");
        fs::write(&path, contents).unwrap();
        path
    }

    /// Write a file anywhere in the environment.
    pub fn write_file(&self, path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Create a symlink under the root.
    #[cfg(unix)]
    pub fn symlink(&self, relative: &str, target: impl AsRef<Path>) {
        let link = self.root.join(relative);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        std::os::unix::fs::symlink(target, link).unwrap();
    }
}

/// Trimmed stdout of a finished command.
#[allow(dead_code)]
pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
