//! Test support utilities for sealbook integration tests.
//!
//! Provides isolated CLI environments plus helpers for driving the library
//! directly with injected faults.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod library;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir and home dir. Child processes get
/// `HOME` and `SEALBOOK_AGE_KEY_FILE` pointed into the temp home, so tests
/// can run in parallel without touching the real user config.
pub struct Test {
    /// Working directory for commands (stores are created under it)
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create an environment with an identity and an initialized store.
    pub fn init(name: &str) -> Self {
        let t = Self::new();
        assert_success(&t.keygen());
        let output = t.init_cmd(name);
        assert!(
            output.status.success(),
            "Failed to initialize store: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Identity file used by child processes.
    pub fn key_file(&self) -> PathBuf {
        self.home.path().join(".sealbook").join("identity.key")
    }

    /// Global registry file used by child processes.
    pub fn config_file(&self) -> PathBuf {
        self.home.path().join(".sealbook").join("config.toml")
    }

    /// Root of the store created for `name` by [`Test::init`].
    pub fn store_root(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
