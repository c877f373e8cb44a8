use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness running the binary in headless mode inside a temporary
/// working directory, so no stray `datebook.toml` is picked up.
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a `datebook.toml` into the working directory
    pub fn with_config(self, contents: &str) -> Self {
        fs::write(self.dir().join("datebook.toml"), contents).expect("Failed to write config");
        self
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("datebook").expect("Failed to find datebook binary");
        cmd.current_dir(self.dir());
        cmd.env_remove("RUST_LOG");
        cmd.env("TZ", "UTC");
        cmd
    }

    /// Write `lines` to a script file and return its path
    pub fn script(&self, lines: &[&str]) -> PathBuf {
        let path = self.dir().join("script.txt");
        fs::write(&path, lines.join("\n")).expect("Failed to write script");
        path
    }

    /// Run a script in headless mode
    pub fn run_script(&self, lines: &[&str]) -> assert_cmd::assert::Assert {
        let path = self.script(lines);
        self.command()
            .args(["--mode", "headless"])
            .arg(path)
            .assert()
    }

    /// Run a script and assert success
    pub fn run_success(&self, lines: &[&str]) -> assert_cmd::assert::Assert {
        self.run_script(lines).success()
    }
}

/// Common scripts
pub struct TestFixtures;

impl TestFixtures {
    /// A School calendar in New York, selected
    pub fn school_calendar() -> Vec<&'static str> {
        vec![
            "create calendar --name School --timezone America/New_York",
            "use calendar --name School",
        ]
    }

    /// School calendar plus a Math Class series on 2025-06-02, 06-04 and 06-06
    pub fn math_class() -> Vec<&'static str> {
        let mut lines = Self::school_calendar();
        lines.push(
            r#"create event "Math Class" from 2025-06-02T09:00 to 2025-06-02T10:00 repeats MWF for 3 times"#,
        );
        lines
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn has_event_table_headers() -> impl Predicate<str> {
        predicate::str::contains("Subject")
            .and(predicate::str::contains("Start"))
            .and(predicate::str::contains("Location"))
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error")
    }
}
