//! Platform-specific directory management
//!
//! Provides paths for the config file, installed packages and the download
//! cache. Follows the XDG Base Directory Specification on Linux and standard
//! locations on macOS and Windows.
//!
//! Environment variables can override default directories:
//! - `FPGAFLOW_CACHE_DIR` - Override cache directory
//! - `FPGAFLOW_CONFIG_DIR` - Override config directory
//! - `FPGAFLOW_DATA_DIR` - Override data directory

use std::env;
use std::path::PathBuf;

/// Environment variable names for directory overrides
pub const ENV_CACHE_DIR: &str = "FPGAFLOW_CACHE_DIR";
pub const ENV_CONFIG_DIR: &str = "FPGAFLOW_CONFIG_DIR";
pub const ENV_DATA_DIR: &str = "FPGAFLOW_DATA_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "fpgaflow";

/// Subdirectory names
const PACKAGES_SUBDIR: &str = "packages";
const DOWNLOADS_SUBDIR: &str = "downloads";

/// Platform-specific directory provider for fpgaflow
#[derive(Debug, Clone)]
pub struct FpgaflowDirs {
    cache_dir: PathBuf,
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl FpgaflowDirs {
    /// Create a new `FpgaflowDirs` instance
    ///
    /// Checks environment variables first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache_dir: resolve(ENV_CACHE_DIR, dirs::cache_dir, &[".cache"]),
            config_dir: resolve(ENV_CONFIG_DIR, dirs::config_dir, &[".config"]),
            data_dir: resolve(ENV_DATA_DIR, dirs::data_dir, &[".local", "share"]),
        }
    }

    /// Create an instance rooted at explicit directories
    #[must_use]
    pub fn with_roots(cache_dir: PathBuf, config_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            config_dir,
            data_dir,
        }
    }

    /// Get the cache directory path
    ///
    /// - Linux: `$XDG_CACHE_HOME/fpgaflow` or `~/.cache/fpgaflow`
    /// - macOS: `~/Library/Caches/fpgaflow`
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }

    /// Get the config directory path
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the data directory path
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    /// Default directory holding installed packages
    #[must_use]
    pub fn packages_dir(&self) -> PathBuf {
        self.data_dir.join(PACKAGES_SUBDIR)
    }

    /// Directory caching downloaded package archives
    #[must_use]
    pub fn downloads_dir(&self) -> PathBuf {
        self.cache_dir.join(DOWNLOADS_SUBDIR)
    }

    /// Path to `config.toml` in the config directory
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}

impl Default for FpgaflowDirs {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a directory from an environment override, the platform default,
/// or a path under the home directory
fn resolve(env_var: &str, platform: fn() -> Option<PathBuf>, home_fallback: &[&str]) -> PathBuf {
    if let Ok(path) = env::var(env_var) {
        return PathBuf::from(path);
    }

    platform().map(|p| p.join(APP_NAME)).unwrap_or_else(|| {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home_fallback
            .iter()
            .fold(base, |acc, part| acc.join(part))
            .join(APP_NAME)
    })
}
