//! On-disk package store
//!
//! Every installed package lives in `<packages_dir>/<name>/` and carries a
//! `package.toml` marker recording the installed version and platform. A
//! directory without a readable marker does not count as installed.

use std::path::{Path, PathBuf};

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::config::defaults::PACKAGE_MARKER;
use crate::core::manifest::PackageInfo;
use crate::core::orchestrator::PackageStore;
use crate::error::PackageError;
use crate::infra::archive;
use crate::infra::download::{DownloadManager, ProgressCallback};
use crate::infra::filesystem;

/// Creates a progress callback for one download, labelled with the package name
pub type ProgressFactory = Box<dyn Fn(&str) -> ProgressCallback>;

/// Content of the marker file in an installed package directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledMarker {
    pub name: String,
    pub version: Version,
    pub platform: String,
}

/// Package store backed by a packages directory and a download cache
pub struct ToolchainStore {
    packages_dir: PathBuf,
    downloads_dir: PathBuf,
    downloader: DownloadManager,
    runtime: tokio::runtime::Runtime,
    progress: Option<ProgressFactory>,
}

impl ToolchainStore {
    /// Create a store; downloads run on a private single-threaded runtime
    pub fn new(
        packages_dir: PathBuf,
        downloads_dir: PathBuf,
        downloader: DownloadManager,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            packages_dir,
            downloads_dir,
            downloader,
            runtime,
            progress: None,
        })
    }

    /// Report download progress through callbacks made by `factory`
    #[must_use]
    pub fn with_progress(mut self, factory: ProgressFactory) -> Self {
        self.progress = Some(factory);
        self
    }

    /// Directory holding installed packages
    pub fn packages_dir(&self) -> &Path {
        &self.packages_dir
    }

    /// Directory of an installed package
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.packages_dir.join(name)
    }

    /// Read the marker of an installed package
    pub fn marker(&self, name: &str) -> Option<InstalledMarker> {
        let path = self.package_dir(name).join(PACKAGE_MARKER);
        let content = filesystem::read_file(&path).ok()?;
        match toml::from_str::<InstalledMarker>(&content) {
            Ok(marker) if marker.name == name => Some(marker),
            Ok(marker) => {
                tracing::warn!(
                    "Marker in {} names '{}', expected '{name}'",
                    path.display(),
                    marker.name
                );
                None
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable marker {}: {e}", path.display());
                None
            }
        }
    }

    fn archive_path(&self, info: &PackageInfo, version: &Version, platform_id: &str) -> PathBuf {
        self.downloads_dir
            .join(format!("{}-{version}-{platform_id}.tar.gz", info.name))
    }

    fn install_inner(
        &self,
        info: &PackageInfo,
        version: &Version,
        platform_id: &str,
    ) -> Result<(), String> {
        let url = info.download_url(version, platform_id);
        let archive_path = self.archive_path(info, version, platform_id);
        let progress = self.progress.as_ref().map(|factory| factory(&info.name));

        tracing::info!("Fetching {} from {url}", info.name);
        self.runtime
            .block_on(self.downloader.fetch(
                &url,
                &archive_path,
                info.checksum_for(version),
                progress,
            ))
            .map_err(|e| e.to_string())?;

        filesystem::create_dir_all(&self.packages_dir).map_err(|e| e.to_string())?;
        let staging = self.packages_dir.join(format!(".{}.staging", info.name));
        filesystem::remove_dir_all(&staging).map_err(|e| e.to_string())?;

        let placed = archive::extract_tar_gz(&archive_path, &staging)
            .and_then(|()| archive::package_root(&staging))
            .and_then(|root| {
                let target = self.package_dir(&info.name);
                filesystem::remove_dir_all(&target)?;
                filesystem::rename(&root, &target)?;
                let marker = InstalledMarker {
                    name: info.name.clone(),
                    version: version.clone(),
                    platform: platform_id.to_string(),
                };
                let content = toml::to_string(&marker).map_err(|e| {
                    crate::error::FilesystemError::WriteFile {
                        path: target.join(PACKAGE_MARKER),
                        error: e.to_string(),
                    }
                })?;
                filesystem::write_file(&target.join(PACKAGE_MARKER), &content)
            });

        // The staging directory is gone after a stripped rename, but not
        // after a flat one or a failure.
        let _ = filesystem::remove_dir_all(&staging);
        placed.map_err(|e| e.to_string())
    }
}

impl PackageStore for ToolchainStore {
    fn installed_version(&self, name: &str) -> Option<Version> {
        self.marker(name).map(|m| m.version)
    }

    fn is_present(&self, name: &str) -> bool {
        self.package_dir(name).is_dir()
    }

    fn install(
        &self,
        info: &PackageInfo,
        version: &Version,
        platform_id: &str,
    ) -> Result<(), PackageError> {
        self.install_inner(info, version, platform_id)
            .map_err(|error| PackageError::PackageActionFailure {
                package: info.name.clone(),
                action: "install".to_string(),
                error,
            })
    }

    fn uninstall(&self, name: &str) -> Result<(), PackageError> {
        let failure = |error: String| PackageError::PackageActionFailure {
            package: name.to_string(),
            action: "uninstall".to_string(),
            error,
        };

        let dir = self.package_dir(name);
        if !dir.is_dir() {
            return Err(failure(format!("{} does not exist", dir.display())));
        }
        filesystem::remove_dir_all(&dir).map_err(|e| failure(e.to_string()))?;
        tracing::info!("Removed {}", dir.display());
        Ok(())
    }
}
