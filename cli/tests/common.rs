//! # Career Mentor Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test runs the
//! compiled `career-mentor` binary inside a throwaway directory that doubles as
//! `HOME` and the working directory, so no real user or project configuration
//! leaks into the run.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Credential value injected into test runs.
pub const TEST_API_KEY: &str = "test-key-123";

/// # Isolated Sandbox (`sandbox`)
///
/// Creates a temporary directory used as `HOME`, `XDG_CONFIG_HOME` and working directory.
pub fn sandbox() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir for test sandbox")
}

/// # Get Career Mentor Command (`mentor_cmd`)
///
/// A `career-mentor` command isolated to `dir`, with the API key set.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn mentor_cmd(dir: &Path) -> Command {
    let mut cmd = bare_cmd(dir);
    cmd.env("GEMINI_API_KEY", TEST_API_KEY);
    cmd
}

/// Like `mentor_cmd`, but with no API key in the environment.
pub fn bare_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("career-mentor").expect("Failed to find career-mentor binary");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `.career-mentor.toml` into `dir`.
pub fn write_project_config(dir: &Path, content: &str) {
    std::fs::write(dir.join(".career-mentor.toml"), content)
        .expect("Failed to write project config");
}
