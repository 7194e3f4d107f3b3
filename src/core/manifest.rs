//! Package manifest (packages.toml) parsing
//!
//! The package table lists every toolchain package with the platforms it
//! applies to. A [`PlatformManifest`] is the slice of that table for one
//! platform id, in table order.

use std::collections::BTreeMap;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::spec::PackageSpec;
use crate::error::PackageError;

/// One package entry of the package table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageInfo {
    /// Package name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Version installed when none is requested
    pub version: Version,

    /// Other versions that may be requested explicitly
    #[serde(default)]
    pub versions: Vec<Version>,

    /// Download URL template; `{name}`, `{version}` and `{platform}` are expanded
    pub url: String,

    /// Optional sha256 checksums, keyed by version
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,

    /// Platform ids this package applies to; empty means every platform
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl PackageInfo {
    /// Whether the package is available on `platform_id`
    pub fn applies_to(&self, platform_id: &str) -> bool {
        self.platforms.is_empty() || self.platforms.iter().any(|p| p == platform_id)
    }

    /// Whether `version` can be installed
    pub fn offers(&self, version: &Version) -> bool {
        *version == self.version || self.versions.contains(version)
    }

    /// Pick the version to install for a spec
    pub fn select_version(&self, spec: &PackageSpec) -> Result<Version, PackageError> {
        match &spec.version {
            None => Ok(self.version.clone()),
            Some(v) if self.offers(v) => Ok(v.clone()),
            Some(v) => Err(PackageError::VersionNotAvailable {
                package: self.name.clone(),
                version: v.to_string(),
            }),
        }
    }

    /// Expand the URL template for a version and platform
    pub fn download_url(&self, version: &Version, platform_id: &str) -> String {
        self.url
            .replace("{name}", &self.name)
            .replace("{version}", &version.to_string())
            .replace("{platform}", platform_id)
    }

    /// Declared sha256 checksum for a version, if any
    pub fn checksum_for(&self, version: &Version) -> Option<&str> {
        self.checksums.get(&version.to_string()).map(String::as_str)
    }
}

/// The full package table as stored in packages.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageTable {
    /// Package entries in file order
    #[serde(rename = "package", default)]
    pub packages: Vec<PackageInfo>,
}

impl PackageTable {
    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Select the entries for one platform
    ///
    /// When several entries share a name, the first one that applies wins.
    pub fn for_platform(&self, platform_id: &str) -> PlatformManifest {
        let mut packages: Vec<PackageInfo> = Vec::new();
        for info in self.packages.iter().filter(|p| p.applies_to(platform_id)) {
            if packages.iter().all(|p| p.name != info.name) {
                packages.push(info.clone());
            }
        }
        PlatformManifest::new(platform_id, packages)
    }
}

/// Packages available on one platform, in manifest order
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformManifest {
    platform_id: String,
    packages: Vec<PackageInfo>,
}

impl PlatformManifest {
    /// Create a manifest from already-filtered entries
    pub fn new(platform_id: impl Into<String>, packages: Vec<PackageInfo>) -> Self {
        Self {
            platform_id: platform_id.into(),
            packages,
        }
    }

    /// The platform this manifest was selected for
    pub fn platform_id(&self) -> &str {
        &self.platform_id
    }

    /// Look up a package by name
    pub fn get(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Whether the manifest has a package named `name`
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Package names in manifest order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|p| p.name.as_str())
    }

    /// Package entries in manifest order
    pub fn packages(&self) -> &[PackageInfo] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
[[package]]
name = "oss-cad-suite"
description = "Yosys HQ tools"
version = "0.2.1"
versions = ["0.2.0"]
url = "https://example.com/{name}-{platform}-{version}.tar.gz"

[package.checksums]
"0.2.1" = "abc123"

[[package]]
name = "drivers"
description = "FTDI drivers"
version = "1.0.0"
url = "https://example.com/drivers-{version}.tar.gz"
platforms = ["windows_amd64"]

[[package]]
name = "examples"
version = "0.0.35"
url = "https://example.com/examples-{version}.tar.gz"
"#;

    #[test]
    fn test_parse_package_table() {
        let table = PackageTable::from_toml(TABLE).unwrap();
        assert_eq!(table.packages.len(), 3);
        assert_eq!(table.packages[0].version, Version::new(0, 2, 1));
        assert_eq!(table.packages[2].description, "");
    }

    #[test]
    fn test_for_platform_filters_and_keeps_order() {
        let table = PackageTable::from_toml(TABLE).unwrap();

        let linux = table.for_platform("linux_x86_64");
        assert_eq!(linux.platform_id(), "linux_x86_64");
        assert_eq!(linux.names().collect::<Vec<_>>(), vec!["oss-cad-suite", "examples"]);
        assert!(!linux.contains("drivers"));

        let windows = table.for_platform("windows_amd64");
        assert_eq!(
            windows.names().collect::<Vec<_>>(),
            vec!["oss-cad-suite", "drivers", "examples"]
        );
    }

    #[test]
    fn test_select_version() {
        let table = PackageTable::from_toml(TABLE).unwrap();
        let info = &table.packages[0];

        let default = info.select_version(&PackageSpec::latest("oss-cad-suite")).unwrap();
        assert_eq!(default, Version::new(0, 2, 1));

        let older = info
            .select_version(&PackageSpec::parse("oss-cad-suite@0.2.0").unwrap())
            .unwrap();
        assert_eq!(older, Version::new(0, 2, 0));

        let missing = info.select_version(&PackageSpec::parse("oss-cad-suite@9.9.9").unwrap());
        assert!(matches!(missing, Err(PackageError::VersionNotAvailable { .. })));
    }

    #[test]
    fn test_download_url_and_checksum() {
        let table = PackageTable::from_toml(TABLE).unwrap();
        let info = &table.packages[0];
        let version = Version::new(0, 2, 1);

        assert_eq!(
            info.download_url(&version, "darwin_arm64"),
            "https://example.com/oss-cad-suite-darwin_arm64-0.2.1.tar.gz"
        );
        assert_eq!(info.checksum_for(&version), Some("abc123"));
        assert_eq!(info.checksum_for(&Version::new(0, 2, 0)), None);
    }

    #[test]
    fn test_duplicate_names_first_applicable_wins() {
        let content = r#"
[[package]]
name = "gtkwave"
version = "3.3.0"
url = "win"
platforms = ["windows_amd64"]

[[package]]
name = "gtkwave"
version = "3.4.0"
url = "other"
"#;
        let table = PackageTable::from_toml(content).unwrap();
        assert_eq!(table.for_platform("windows_amd64").get("gtkwave").unwrap().url, "win");
        assert_eq!(table.for_platform("linux_x86_64").get("gtkwave").unwrap().url, "other");
    }
}
