//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers isolated from the user's configuration
//! - Layer file fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would change the behaviour under test.
const PREFSTACK_VARS: &[&str] = &[
    "PREFSTACK_CONFIG",
    "PREFSTACK_STRICT",
    "PREFSTACK_REQUIRE_LAYERS",
    "PREFSTACK_OUTPUT_FORMAT",
    "PREFSTACK_IGNORE_CONFLICTS",
    "PREFSTACK_DIAGNOSTICS",
    "PREFSTACK_LOG_MODE",
];

/// Layer with two keys, one of which `SECOND` overrides.
#[allow(dead_code)]
pub const FIRST: &str = "user_pref(\"a\", 1);\nuser_pref(\"b\", 2); // 0102\n";

/// Layer overriding `b` and adding `c`.
#[allow(dead_code)]
pub const SECOND: &str = "user_pref(\"b\", 3);\nuser_pref(\"c\", 4);\n";

/// Test environment with an isolated working and home directory.
///
/// Commands run inside the temporary directory with `HOME` pointing at it,
/// so neither project nor user configuration from the host is picked up.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the prefstack binary running in this
    /// environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("prefstack").expect("Failed to find prefstack binary");
        cmd.current_dir(&self.temp_path).env("HOME", &self.temp_path);
        for var in PREFSTACK_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the environment and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write the two standard layers and return their paths in order.
    pub fn standard_layers(&self) -> (PathBuf, PathBuf) {
        (self.write("1.js", FIRST), self.write("2.js", SECOND))
    }
}

/// Path of a revision fixture shared with the library tests.
#[allow(dead_code)]
pub fn revision(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("prefstack")
        .join("tests")
        .join("fixtures")
        .join("revisions")
        .join(name)
}
