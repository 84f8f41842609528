//! Common test utilities for gantry integration tests.
//!
//! - `TestProject`: a temporary project with `gantry.toml`, `cmd/` and `bin/`
//! - `run_gantry`: run the CLI binary against a project

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Configuration with a region and an execution role
pub const FULL_CONFIG: &str = r#"
name = "shop"
region = "eu-west-1"
role = "arn:aws:iam::123456789012:role/shop-exec"
"#;

/// Configuration without an execution role; only updates can succeed
pub const NO_ROLE_CONFIG: &str = r#"
name = "shop"
region = "eu-west-1"
"#;

/// Result of running the gantry CLI
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Isolated project directory
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn with_config(config: &str) -> Self {
        let project = Self::new();
        project.write("gantry.toml", config);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// A function source directory plus its compiled binary
    pub fn add_function(&self, name: &str) -> &Self {
        self.write(&format!("cmd/{}/main.go", name), "package main\n");
        self.write(&format!("bin/{}", name), &format!("binary of {}", name));
        self
    }

    pub fn journal_path(&self) -> PathBuf {
        self.path(gantry::infrastructure::repositories::JOURNAL_PATH)
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        run_gantry(self.root(), args)
    }
}

/// Run the gantry binary with `--project <root>` and no GANTRY_* overrides
pub fn run_gantry(root: &Path, args: &[&str]) -> TestResult {
    let output = Command::new(env!("CARGO_BIN_EXE_gantry"))
        .arg("--project")
        .arg(root)
        .args(args)
        .env_remove("GANTRY_REGION")
        .env_remove("GANTRY_ROLE")
        .env_remove("GANTRY_STAGE")
        .env_remove("GANTRY_STRICT")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    TestResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
