//! Platform ids
//!
//! A platform id (`linux_x86_64`, `darwin_arm64`, ...) selects which
//! packages apply to the running system.

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;

/// One known platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformInfo {
    /// Platform id
    pub id: String,

    #[serde(default)]
    pub description: String,

    /// Value of `std::env::consts::OS` on this platform
    pub os: String,

    /// Values of `std::env::consts::ARCH` mapped to this platform
    pub arch: Vec<String>,
}

/// Platform table (platforms.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlatformTable {
    #[serde(rename = "platform", default)]
    pub platforms: Vec<PlatformInfo>,
}

impl PlatformTable {
    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Known platform ids in table order
    pub fn ids(&self) -> Vec<String> {
        self.platforms.iter().map(|p| p.id.clone()).collect()
    }

    /// Look up a platform by id
    pub fn get(&self, id: &str) -> Option<&PlatformInfo> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Find the platform matching an OS/architecture pair
    pub fn detect(&self, os: &str, arch: &str) -> Option<&PlatformInfo> {
        self.platforms
            .iter()
            .find(|p| p.os == os && p.arch.iter().any(|a| a == arch))
    }

    /// Select the platform for this invocation
    ///
    /// An override must name a known platform; otherwise the host is detected.
    pub fn select(
        &self,
        override_id: Option<&str>,
        os: &str,
        arch: &str,
    ) -> Result<&PlatformInfo, ResourceError> {
        match override_id {
            Some(id) => self.get(id).ok_or_else(|| ResourceError::UnknownPlatform {
                id: id.to_string(),
                known: self.ids(),
            }),
            None => self.detect(os, arch).ok_or_else(|| ResourceError::UnsupportedHost {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATFORMS: &str = r#"
[[platform]]
id = "linux_x86_64"
os = "linux"
arch = ["x86_64"]

[[platform]]
id = "darwin_arm64"
os = "macos"
arch = ["aarch64"]

[[platform]]
id = "windows_amd64"
os = "windows"
arch = ["x86_64"]
"#;

    #[test]
    fn test_detect_host() {
        let table = PlatformTable::from_toml(PLATFORMS).unwrap();
        assert_eq!(table.detect("linux", "x86_64").unwrap().id, "linux_x86_64");
        assert_eq!(table.detect("windows", "x86_64").unwrap().id, "windows_amd64");
        assert_eq!(table.detect("macos", "aarch64").unwrap().id, "darwin_arm64");
        assert!(table.detect("freebsd", "x86_64").is_none());
    }

    #[test]
    fn test_select_override_wins() {
        let table = PlatformTable::from_toml(PLATFORMS).unwrap();
        let selected = table.select(Some("darwin_arm64"), "linux", "x86_64").unwrap();
        assert_eq!(selected.id, "darwin_arm64");
    }

    #[test]
    fn test_select_unknown_override_fails() {
        let table = PlatformTable::from_toml(PLATFORMS).unwrap();
        match table.select(Some("amiga_m68k"), "linux", "x86_64") {
            Err(ResourceError::UnknownPlatform { id, known }) => {
                assert_eq!(id, "amiga_m68k");
                assert_eq!(known.len(), 3);
            }
            other => panic!("Expected UnknownPlatform, got: {other:?}"),
        }
    }

    #[test]
    fn test_select_unsupported_host_fails() {
        let table = PlatformTable::from_toml(PLATFORMS).unwrap();
        assert!(matches!(
            table.select(None, "freebsd", "riscv64"),
            Err(ResourceError::UnsupportedHost { .. })
        ));
    }
}
