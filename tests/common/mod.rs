//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

/// Isolated fpgaflow environment
///
/// Every directory fpgaflow touches (cache, config, data, resources and a
/// project directory) lives inside one temporary directory.
pub struct TestEnv {
    /// Temporary root
    pub dir: TempDir,
}

impl TestEnv {
    /// Create a new environment in a temporary directory
    pub fn new() -> Self {
        let env = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        for sub in ["cache", "config", "data", "resources", "project", "mirror"] {
            env.create_dir(sub);
        }
        env
    }

    /// Get the path to the environment root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Project directory used as working directory
    pub fn project(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    /// Directory holding local package archives
    pub fn mirror(&self) -> PathBuf {
        self.dir.path().join("mirror")
    }

    /// Installed package directory
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.dir.path().join("data/packages").join(name)
    }

    /// Create a file relative to the root
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory relative to the root
    pub fn create_dir(&self, name: &str) {
        std::fs::create_dir_all(self.dir.path().join(name)).expect("Failed to create directory");
    }

    /// Replace the package table with `content`
    pub fn set_packages(&self, content: &str) {
        self.create_file("resources/packages.toml", content);
    }

    /// Write `config.toml`
    pub fn set_config(&self, content: &str) {
        self.create_file("config/config.toml", content);
    }

    /// Build a `.tar.gz` in the mirror directory and return its path
    pub fn mirror_archive(&self, file_name: &str, files: &[(&str, &str)]) -> PathBuf {
        let path = self.mirror().join(file_name);
        write_archive(&path, files);
        path
    }

    /// Command running the fpgaflow binary inside this environment
    pub fn command(&self) -> Command {
        let root = self.dir.path();
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_fpgaflow"));
        cmd.current_dir(self.project())
            .env("FPGAFLOW_CACHE_DIR", root.join("cache"))
            .env("FPGAFLOW_CONFIG_DIR", root.join("config"))
            .env("FPGAFLOW_DATA_DIR", root.join("data"))
            .env("FPGAFLOW_RESOURCES_DIR", root.join("resources"))
            .env_remove("RUST_LOG")
            .env_remove("FPGAFLOW_PLATFORM");
        cmd
    }

    /// Run fpgaflow with arguments and an empty stdin
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .stdin(std::process::Stdio::null())
            .output()
            .expect("Failed to execute fpgaflow")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a gzip-compressed tarball containing `files`
pub fn write_archive(path: &Path, files: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create archive directory");
    }
    let file = std::fs::File::create(path).expect("Failed to create archive");
    let mut tar = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_path(name).expect("Invalid archive path");
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        tar.append(&header, content.as_bytes())
            .expect("Failed to append archive entry");
    }
    tar.into_inner()
        .expect("Failed to finish tar")
        .finish()
        .expect("Failed to finish gzip");
}

/// Stdout of a finished command
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr of a finished command
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Package table for two packages served from `mirror`
pub fn mirror_packages(mirror: &Path) -> String {
    format!(
        r#"
[[package]]
name = "yosys"
description = "Synthesis suite"
version = "0.40.0"
versions = ["0.39.0"]
url = "{mirror}/{{name}}-{{version}}-{{platform}}.tar.gz"

[[package]]
name = "nextpnr"
description = "Place and route"
version = "0.7.0"
url = "{mirror}/{{name}}-{{version}}-{{platform}}.tar.gz"
"#,
        mirror = mirror.display()
    )
}
