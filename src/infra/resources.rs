//! Resource tables
//!
//! Loads the platform, package, board and FPGA tables. The built-in copies
//! are compiled into the binary; a resource directory may replace any of
//! them file by file, and a project may extend the board table.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::config::defaults::PROJECT_BOARDS_FILE;
use crate::core::board::{BoardTable, FpgaTable};
use crate::core::manifest::{PackageTable, PlatformManifest};
use crate::core::platform::PlatformTable;
use crate::error::ResourceError;

const PLATFORMS_FILE: &str = "platforms.toml";
const PACKAGES_FILE: &str = "packages.toml";
const BOARDS_FILE: &str = "boards.toml";
const FPGAS_FILE: &str = "fpgas.toml";

const BUILTIN_PLATFORMS: &str = include_str!("../../resources/platforms.toml");
const BUILTIN_PACKAGES: &str = include_str!("../../resources/packages.toml");
const BUILTIN_BOARDS: &str = include_str!("../../resources/boards.toml");
const BUILTIN_FPGAS: &str = include_str!("../../resources/fpgas.toml");

/// Loads resource tables from the override directory or the built-in copies
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader {
    override_dir: Option<PathBuf>,
}

impl ResourceLoader {
    /// Create a loader; `override_dir` files replace the built-in tables
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    /// Platform table
    pub fn platforms(&self) -> Result<PlatformTable, ResourceError> {
        let content = self.read(PLATFORMS_FILE, BUILTIN_PLATFORMS)?;
        PlatformTable::from_toml(&content).map_err(|e| parse_error(PLATFORMS_FILE, &e))
    }

    /// Package table for every platform
    pub fn packages(&self) -> Result<PackageTable, ResourceError> {
        let content = self.read(PACKAGES_FILE, BUILTIN_PACKAGES)?;
        PackageTable::from_toml(&content).map_err(|e| parse_error(PACKAGES_FILE, &e))
    }

    /// FPGA table
    pub fn fpgas(&self) -> Result<FpgaTable, ResourceError> {
        let content = self.read(FPGAS_FILE, BUILTIN_FPGAS)?;
        FpgaTable::from_toml(&content).map_err(|e| parse_error(FPGAS_FILE, &e))
    }

    /// Board table, extended by `<project_dir>/boards.toml` when present
    pub fn boards(&self, project_dir: Option<&Path>) -> Result<BoardTable, ResourceError> {
        let content = self.read(BOARDS_FILE, BUILTIN_BOARDS)?;
        let mut table =
            BoardTable::from_toml(&content).map_err(|e| parse_error(BOARDS_FILE, &e))?;

        if let Some(dir) = project_dir {
            let project_boards = dir.join(PROJECT_BOARDS_FILE);
            if project_boards.is_file() {
                tracing::info!("Loading project boards from {}", project_boards.display());
                let content = read_file(&project_boards)?;
                let overlay = BoardTable::from_toml(&content)
                    .map_err(|e| parse_error(&project_boards.display().to_string(), &e))?;
                table.merge(overlay);
            }
        }

        Ok(table)
    }

    /// Select the platform and build its package manifest
    ///
    /// `platform_override` must be a known platform id; without it the host
    /// platform is detected.
    pub fn platform_manifest(
        &self,
        platform_override: Option<&str>,
    ) -> Result<PlatformManifest, ResourceError> {
        let platforms = self.platforms()?;
        let platform = platforms.select(
            platform_override,
            std::env::consts::OS,
            std::env::consts::ARCH,
        )?;
        tracing::debug!("Selected platform {} ({})", platform.id, platform.description);

        Ok(self.packages()?.for_platform(&platform.id))
    }

    fn read(&self, file: &str, builtin: &'static str) -> Result<Cow<'static, str>, ResourceError> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(file);
            if path.is_file() {
                tracing::debug!("Using resource override {}", path.display());
                return read_file(&path).map(Cow::Owned);
            }
        }
        Ok(Cow::Borrowed(builtin))
    }
}

fn read_file(path: &Path) -> Result<String, ResourceError> {
    std::fs::read_to_string(path).map_err(|e| ResourceError::ReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

fn parse_error(name: &str, error: &toml::de::Error) -> ResourceError {
    ResourceError::ParseError {
        name: name.to_string(),
        error: error.to_string(),
    }
}
