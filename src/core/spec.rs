//! Package specifications
//!
//! A package spec is the `name` or `name@version` token given on the
//! command line.

use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::error::PackageError;

/// Separator between package name and version
pub const VERSION_SEPARATOR: char = '@';

/// A requested package, optionally pinned to a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Package name, never empty
    pub name: String,
    /// Explicit version; `None` means the manifest default
    pub version: Option<Version>,
}

impl PackageSpec {
    /// A spec for the manifest default version of `name`
    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Parse a `name` or `name@version` token
    pub fn parse(token: &str) -> Result<Self, PackageError> {
        let malformed = |reason: &str| PackageError::MalformedPackageSpec {
            spec: token.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = token.split(VERSION_SEPARATOR);
        let name = parts.next().unwrap_or_default().trim();
        let version = parts.next();
        if parts.next().is_some() {
            return Err(malformed("more than one '@' separator"));
        }

        if name.is_empty() {
            return Err(malformed("package name is empty"));
        }

        let version = match version {
            None => None,
            Some(v) if v.trim().is_empty() => return Err(malformed("version after '@' is empty")),
            Some(v) => Some(
                Version::parse(v.trim())
                    .map_err(|e| malformed(&format!("invalid version '{v}': {e}")))?,
            ),
        };

        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

impl FromStr for PackageSpec {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}{VERSION_SEPARATOR}{version}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::generators::{package_name, semver_version};
    use proptest::prelude::*;

    #[test]
    fn test_parse_name_only() {
        let spec = PackageSpec::parse("oss-cad-suite").unwrap();
        assert_eq!(spec, PackageSpec::latest("oss-cad-suite"));
    }

    #[test]
    fn test_parse_name_and_version() {
        let spec: PackageSpec = "examples@0.0.32".parse().unwrap();
        assert_eq!(spec.name, "examples");
        assert_eq!(spec.version, Some(Version::new(0, 0, 32)));
        assert_eq!(spec.to_string(), "examples@0.0.32");
    }

    #[test]
    fn test_parse_rejects_two_separators() {
        let err = PackageSpec::parse("a@b@c").unwrap_err();
        match err {
            PackageError::MalformedPackageSpec { spec, reason } => {
                assert_eq!(spec, "a@b@c");
                assert!(reason.contains("more than one"));
            }
            e => panic!("Expected MalformedPackageSpec, got: {e:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert!(matches!(
            PackageSpec::parse("@1.0.0"),
            Err(PackageError::MalformedPackageSpec { .. })
        ));
        assert!(matches!(
            PackageSpec::parse(""),
            Err(PackageError::MalformedPackageSpec { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_or_invalid_version() {
        assert!(matches!(
            PackageSpec::parse("examples@"),
            Err(PackageError::MalformedPackageSpec { .. })
        ));
        let err = PackageSpec::parse("examples@latest").unwrap_err();
        assert!(err.to_string().contains("invalid version 'latest'"));
    }

    #[test]
    fn test_parse_accepts_prerelease() {
        let spec = PackageSpec::parse("verible@0.0.3-rc.1").unwrap();
        assert_eq!(spec.version.unwrap().pre.as_str(), "rc.1");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_name_at_version_parses_back(name in package_name(), version in semver_version()) {
            let spec = PackageSpec::parse(&format!("{name}@{version}")).unwrap();
            prop_assert_eq!(&spec.name, &name);
            prop_assert_eq!(spec.version.map(|v| v.to_string()), Some(version));
        }

        #[test]
        fn prop_bare_name_has_no_version(name in package_name()) {
            let spec = PackageSpec::parse(&name).unwrap();
            prop_assert_eq!(spec, PackageSpec::latest(name));
        }
    }
}
