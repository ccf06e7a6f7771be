//! # TechSupport CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`cli_ask.rs`, `cli_chat.rs`, ...).
//! Each `.rs` file in `cli/tests/` is compiled as its own test crate; this one is
//! pulled in with `mod common;`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// # Get TechSupport Command (`techsupport_cmd`)
///
/// An `assert_cmd::Command` for the compiled `techsupport` binary, with the
/// `TECHSUPPORT_CONFIG` variable cleared so the host environment cannot leak in.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn techsupport_cmd() -> Command {
    let mut cmd =
        Command::cargo_bin("techsupport").expect("Failed to find techsupport binary for testing");
    cmd.env_remove("TECHSUPPORT_CONFIG");
    cmd
}

/// # Write Config (`write_config`)
///
/// Writes `content` to `config.toml` inside a fresh temporary directory. Keep the
/// returned `TempDir` alive for as long as the path is in use.
pub fn write_config(content: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir for config");
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config file");
    let path = path.to_string_lossy().into_owned();
    (dir, path)
}

/// # Isolated Command (`isolated_cmd`)
///
/// `techsupport_cmd()` pointed at an explicit config file, so neither the user
/// config directory nor a `.techsupport.toml` in an ancestor directory is read.
pub fn isolated_cmd(config_toml: &str) -> (TempDir, Command) {
    let (dir, path) = write_config(config_toml);
    let mut cmd = techsupport_cmd();
    cmd.args(["--config", &path]);
    (dir, cmd)
}
