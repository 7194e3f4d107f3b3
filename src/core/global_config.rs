//! Global configuration management
//!
//! Reads settings from `config.toml` in the config directory: package and
//! resource locations, a default platform, the lint tool and download
//! retries. A missing file yields the defaults.

use crate::infra::dirs::FpgaflowDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `[resources] dir`
pub const ENV_RESOURCES_DIR: &str = "FPGAFLOW_RESOURCES_DIR";

/// Global configuration error types
#[derive(Error, Debug)]
pub enum GlobalConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Global configuration for fpgaflow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub packages: PackagesConfig,

    #[serde(default)]
    pub resources: ResourcesConfig,

    #[serde(default)]
    pub platform: PlatformConfig,

    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

/// Package store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackagesConfig {
    /// Directory holding installed packages
    pub dir: Option<PathBuf>,
}

/// Resource table settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Directory with replacement resource tables
    pub dir: Option<PathBuf>,
}

/// Platform settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Default platform id override
    pub id: Option<String>,
}

/// Lint settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    /// Linter executable
    pub tool: Option<String>,
}

/// Download settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Maximum download attempts
    pub retries: Option<u32>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// If the config file doesn't exist, returns default configuration.
    /// If the config file exists but is invalid, returns an error.
    pub fn load(dirs: &FpgaflowDirs) -> Result<Self, GlobalConfigError> {
        Self::load_from_path(&dirs.global_config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, GlobalConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| GlobalConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| GlobalConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Get the effective packages directory
    #[must_use]
    pub fn packages_dir(&self, dirs: &FpgaflowDirs) -> PathBuf {
        self.packages.dir.clone().unwrap_or_else(|| dirs.packages_dir())
    }

    /// Get the resource override directory
    ///
    /// `FPGAFLOW_RESOURCES_DIR` wins over the config file.
    #[must_use]
    pub fn resources_dir(&self) -> Option<PathBuf> {
        std::env::var_os(ENV_RESOURCES_DIR)
            .map(PathBuf::from)
            .or_else(|| self.resources.dir.clone())
    }

    /// Get the effective platform override
    ///
    /// The command-line value wins over the config file.
    #[must_use]
    pub fn platform_override<'a>(&'a self, cli: Option<&'a str>) -> Option<&'a str> {
        cli.or(self.platform.id.as_deref())
    }

    /// Get the effective lint tool
    #[must_use]
    pub fn lint_tool(&self) -> &str {
        self.lint
            .tool
            .as_deref()
            .unwrap_or(crate::config::defaults::LINT_TOOL)
    }

    /// Get the effective download retry count
    #[must_use]
    pub fn download_retries(&self) -> u32 {
        self.download
            .retries
            .unwrap_or(crate::config::defaults::MAX_DOWNLOAD_RETRIES)
    }
}
