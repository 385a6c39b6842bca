//! # Parley CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs the
//! compiled `parley` binary inside its own temporary directory with an explicit
//! configuration file, so neither the user's config nor a stray
//! `conversation_log.json` can leak into the results.
//!

// Each test file uses a different subset of these helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding a config file and the conversation log it points at.
pub struct Workspace {
    pub dir: TempDir,
    pub config: PathBuf,
    pub log: PathBuf,
}

impl Workspace {
    /// Workspace with the default pipeline settings.
    pub fn new() -> Self {
        Self::with_extra_config("")
    }

    /// Workspace whose config gets `extra` appended after the `[history]` table.
    pub fn with_extra_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log = dir.path().join("conversation_log.json");
        let config = dir.path().join("parley.toml");
        let content = format!(
            "[history]\npath = {:?}\n\n{}",
            log.to_string_lossy(),
            extra
        );
        fs::write(&config, content).expect("Failed to write test config");
        Self { dir, config, log }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `parley` command pointed at this workspace's config.
    pub fn cmd(&self) -> Command {
        let mut cmd = parley_cmd();
        cmd.current_dir(self.path())
            .env_remove("PARLEY_HISTORY")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    /// Parses the conversation log as raw JSON values.
    pub fn saved_entries(&self) -> Vec<serde_json::Value> {
        let content = fs::read_to_string(&self.log).expect("Failed to read conversation log");
        serde_json::from_str(&content).expect("Conversation log is not a JSON array")
    }
}

/// # Get Parley Command (`parley_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `parley` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn parley_cmd() -> Command {
    Command::cargo_bin("parley").expect("Failed to find parley binary for testing")
}
