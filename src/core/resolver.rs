//! Package spec resolution
//!
//! Turns raw command-line tokens into [`PackageSpec`]s checked against the
//! platform manifest.

use crate::core::manifest::PlatformManifest;
use crate::core::spec::PackageSpec;
use crate::error::PackageError;

/// Outcome of resolving a batch of package tokens
///
/// Each entry is either a spec found in the manifest or the
/// `UnknownPackage` error for a missing name, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub entries: Vec<Result<PackageSpec, PackageError>>,
}

impl Resolution {
    /// Specs found in the manifest
    pub fn specs(&self) -> impl Iterator<Item = &PackageSpec> {
        self.entries.iter().filter_map(|e| e.as_ref().ok())
    }

    /// Errors for names missing from the manifest
    pub fn unknown(&self) -> impl Iterator<Item = &PackageError> {
        self.entries.iter().filter_map(|e| e.as_ref().err())
    }

    /// Total number of requested packages, resolved or not
    pub fn requested(&self) -> usize {
        self.entries.len()
    }

    /// True when every requested name was found
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(Result::is_ok)
    }
}

/// Resolve package tokens against a manifest
///
/// An empty token list selects every manifest package at its default
/// version. A malformed token aborts the whole resolution; unknown names are
/// recorded and the remaining tokens are still resolved.
pub fn resolve<S: AsRef<str>>(
    tokens: &[S],
    manifest: &PlatformManifest,
) -> Result<Resolution, PackageError> {
    if tokens.is_empty() {
        return Ok(Resolution {
            entries: manifest.names().map(|n| Ok(PackageSpec::latest(n))).collect(),
        });
    }

    let parsed = tokens
        .iter()
        .map(|t| PackageSpec::parse(t.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let entries = parsed
        .into_iter()
        .map(|spec| {
            if manifest.contains(&spec.name) {
                Ok(spec)
            } else {
                tracing::debug!(
                    "Package '{}' not in manifest for {}",
                    spec.name,
                    manifest.platform_id()
                );
                Err(PackageError::UnknownPackage {
                    name: spec.name,
                    platform: manifest.platform_id().to_string(),
                })
            }
        })
        .collect();

    Ok(Resolution { entries })
}
