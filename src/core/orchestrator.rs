//! Package install/uninstall orchestration
//!
//! Walks a resolved batch one package at a time, asks the [`PackageStore`]
//! to act on each entry and folds the outcomes into a [`BatchReport`].
//! A failing package never stops the batch.

use std::io::{self, Write};

use semver::Version;

use crate::core::manifest::{PackageInfo, PlatformManifest};
use crate::core::resolver::Resolution;
use crate::core::spec::PackageSpec;
use crate::error::PackageError;

/// Install state of packages on disk
pub trait PackageStore {
    /// Version currently installed, if the package is installed correctly
    fn installed_version(&self, name: &str) -> Option<Version>;

    /// Whether anything of the package is on disk, marker or not
    fn is_present(&self, name: &str) -> bool;

    /// Install (or reinstall) a package at the given version
    fn install(
        &self,
        info: &PackageInfo,
        version: &Version,
        platform_id: &str,
    ) -> Result<(), PackageError>;

    /// Remove an installed package
    fn uninstall(&self, name: &str) -> Result<(), PackageError>;
}

/// Asks the user a yes/no question
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// What happened to one package of a batch
#[derive(Debug, Clone, PartialEq)]
pub enum PackageOutcome {
    /// Installed at the given version
    Installed { version: Version },
    /// Uninstalled
    Removed,
    /// Left untouched
    Skipped { reason: String },
    /// The action failed
    Failed { error: PackageError },
}

impl PackageOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome for one package
#[derive(Debug, Clone, PartialEq)]
pub struct PackageResult {
    pub name: String,
    pub outcome: PackageOutcome,
}

/// Results of one install or uninstall batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Per-package results in processing order
    pub results: Vec<PackageResult>,
    /// The user declined the confirmation prompt
    pub declined: bool,
}

impl BatchReport {
    /// Number of packages installed, removed or skipped
    pub fn succeeded(&self) -> usize {
        self.results.len() - self.failed()
    }

    /// Number of packages that failed
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_failure()).count()
    }

    /// Aggregate status: success unless any package failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn record(&mut self, name: &str, outcome: PackageOutcome) -> &PackageResult {
        self.results.push(PackageResult {
            name: name.to_string(),
            outcome,
        });
        &self.results[self.results.len() - 1]
    }
}

/// Installed state of one manifest package, for listing
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PackageStatus {
    pub name: String,
    pub description: String,
    /// Manifest default version
    pub version: Version,
    /// Version on disk, if any
    pub installed: Option<Version>,
}

/// Drives package actions for one command invocation
pub struct Orchestrator<'a, S: PackageStore> {
    manifest: &'a PlatformManifest,
    store: &'a S,
    verbose: bool,
}

impl<'a, S: PackageStore> Orchestrator<'a, S> {
    /// Create an orchestrator over a manifest and a store
    pub fn new(manifest: &'a PlatformManifest, store: &'a S, verbose: bool) -> Self {
        Self {
            manifest,
            store,
            verbose,
        }
    }

    /// Install every entry of a resolution
    ///
    /// Without `force`, packages already installed at the selected version
    /// are skipped.
    pub fn install<W: Write>(
        &self,
        resolution: &Resolution,
        force: bool,
        out: &mut W,
    ) -> io::Result<BatchReport> {
        writeln!(out, "Platform id '{}'", self.manifest.platform_id())?;

        let mut report = BatchReport::default();
        for entry in &resolution.entries {
            let result = match entry {
                Ok(spec) => {
                    let outcome = self.install_one(spec, force, out)?;
                    report.record(&spec.name, outcome)
                }
                Err(error) => report.record(
                    unknown_name(error),
                    PackageOutcome::Failed {
                        error: error.clone(),
                    },
                ),
            };
            write_result(out, result)?;
        }

        tracing::info!(
            "Install finished: {} ok, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// Uninstall every entry of a resolution after confirmation
    ///
    /// A declined confirmation touches nothing and still reports success.
    pub fn uninstall<W: Write, C: Confirm>(
        &self,
        resolution: &Resolution,
        assume_yes: bool,
        confirm: &mut C,
        out: &mut W,
    ) -> io::Result<BatchReport> {
        let count = resolution.requested();
        let noun = if count == 1 { "package" } else { "packages" };
        let prompt = format!("Do you want to uninstall {count} {noun}?");

        if !assume_yes && !confirm.confirm(&prompt)? {
            writeln!(out, "User said no")?;
            return Ok(BatchReport {
                results: Vec::new(),
                declined: true,
            });
        }

        writeln!(out, "Platform id '{}'", self.manifest.platform_id())?;

        let mut report = BatchReport::default();
        for entry in &resolution.entries {
            let result = match entry {
                Ok(spec) => {
                    let outcome = self.uninstall_one(spec, out)?;
                    report.record(&spec.name, outcome)
                }
                Err(error) => report.record(
                    unknown_name(error),
                    PackageOutcome::Failed {
                        error: error.clone(),
                    },
                ),
            };
            write_result(out, result)?;
        }

        tracing::info!(
            "Uninstall finished: {} ok, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// Installed state of every manifest package
    pub fn list(&self) -> Vec<PackageStatus> {
        self.manifest
            .packages()
            .iter()
            .map(|info| PackageStatus {
                name: info.name.clone(),
                description: info.description.clone(),
                version: info.version.clone(),
                installed: self.store.installed_version(&info.name),
            })
            .collect()
    }

    fn install_one<W: Write>(
        &self,
        spec: &PackageSpec,
        force: bool,
        out: &mut W,
    ) -> io::Result<PackageOutcome> {
        let Some(info) = self.manifest.get(&spec.name) else {
            return Ok(PackageOutcome::Failed {
                error: PackageError::UnknownPackage {
                    name: spec.name.clone(),
                    platform: self.manifest.platform_id().to_string(),
                },
            });
        };

        let version = match info.select_version(spec) {
            Ok(v) => v,
            Err(error) => return Ok(PackageOutcome::Failed { error }),
        };

        if !force && self.store.installed_version(&info.name).as_ref() == Some(&version) {
            return Ok(PackageOutcome::Skipped {
                reason: format!("version {version} already installed"),
            });
        }

        if self.verbose {
            writeln!(
                out,
                "Installing {}@{} from {}",
                info.name,
                version,
                info.download_url(&version, self.manifest.platform_id())
            )?;
        }

        let outcome = match self.store.install(info, &version, self.manifest.platform_id()) {
            Ok(()) => PackageOutcome::Installed { version },
            Err(error) => {
                tracing::debug!("Install of '{}' failed: {}", info.name, error);
                PackageOutcome::Failed { error }
            }
        };
        Ok(outcome)
    }

    fn uninstall_one<W: Write>(&self, spec: &PackageSpec, out: &mut W) -> io::Result<PackageOutcome> {
        let name = &spec.name;
        if self.store.installed_version(name).is_none() && !self.store.is_present(name) {
            return Ok(PackageOutcome::Skipped {
                reason: "not installed".to_string(),
            });
        }

        if self.verbose {
            writeln!(out, "Removing {}", spec.name)?;
        }

        let outcome = match self.store.uninstall(&spec.name) {
            Ok(()) => PackageOutcome::Removed,
            Err(error) => PackageOutcome::Failed { error },
        };
        Ok(outcome)
    }
}

/// Render package states as an aligned table
pub fn format_package_list(platform_id: &str, statuses: &[PackageStatus]) -> String {
    let name_width = statuses
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max("Package".len());
    let installed: Vec<String> = statuses
        .iter()
        .map(|s| s.installed.as_ref().map_or_else(|| "-".to_string(), Version::to_string))
        .collect();
    let installed_width = installed
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("Installed".len());

    let mut out = format!("Platform id '{platform_id}'\n\n");
    out.push_str(&format!(
        "{:<name_width$}  {:<installed_width$}  Description\n",
        "Package", "Installed"
    ));
    for (status, installed) in statuses.iter().zip(&installed) {
        out.push_str(&format!(
            "{:<name_width$}  {:<installed_width$}  {}\n",
            status.name, installed, status.description
        ));
    }
    let count = statuses.iter().filter(|s| s.installed.is_some()).count();
    out.push_str(&format!(
        "\n{count} of {} package(s) installed.\n",
        statuses.len()
    ));
    out
}

fn unknown_name(error: &PackageError) -> &str {
    match error {
        PackageError::UnknownPackage { name, .. } => name,
        _ => "<unknown>",
    }
}

fn write_result<W: Write>(out: &mut W, result: &PackageResult) -> io::Result<()> {
    match &result.outcome {
        PackageOutcome::Installed { version } => {
            writeln!(out, "✓ Package '{}' installed ({version})", result.name)
        }
        PackageOutcome::Removed => writeln!(out, "✓ Package '{}' uninstalled", result.name),
        PackageOutcome::Skipped { reason } => {
            writeln!(out, "ℹ Package '{}' skipped: {reason}", result.name)
        }
        PackageOutcome::Failed { error } => writeln!(out, "✗ {error}"),
    }
}
