//! Error types for fpgaflow
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// How an option group was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinationKind {
    /// None of the options in an exactly-one group was given
    Missing,
    /// More than one option of an exclusive group was given
    Conflict,
}

/// Command-line option validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// The supplied flags violate an exclusivity rule
    #[error("{}", describe_combination(.kind, .options))]
    InvalidOptionCombination {
        kind: CombinationKind,
        options: Vec<String>,
    },
}

impl OptionError {
    /// Names of the options involved in the error
    pub fn options(&self) -> &[String] {
        match self {
            Self::InvalidOptionCombination { options, .. } => options,
        }
    }
}

fn describe_combination(kind: &CombinationKind, options: &[String]) -> String {
    let names = options
        .iter()
        .map(|o| format!("'{o}'"))
        .collect::<Vec<_>>()
        .join(", ");
    match kind {
        CombinationKind::Missing => format!("One of {names} must be specified"),
        CombinationKind::Conflict => format!("Options {names} are mutually exclusive"),
    }
}

/// Package-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    /// A package token has invalid syntax
    #[error("Malformed package spec '{spec}': {reason}")]
    MalformedPackageSpec { spec: String, reason: String },

    /// Package is not available for the current platform
    #[error("Unknown package '{name}' for platform '{platform}'")]
    UnknownPackage { name: String, platform: String },

    /// The requested version is not offered by the manifest
    #[error("Version '{version}' is not available for package '{package}'")]
    VersionNotAvailable { package: String, version: String },

    /// The install/uninstall collaborator failed for one package
    #[error("Failed to {action} package '{package}': {error}")]
    PackageActionFailure {
        package: String,
        action: String,
        error: String,
    },
}

/// Resource (manifest, boards, FPGAs, platforms) errors
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A resource table could not be parsed
    #[error("Failed to parse resource '{name}': {error}")]
    ParseError { name: String, error: String },

    /// A resource file could not be read
    #[error("Failed to read resource file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// The platform id is not known
    #[error("Unknown platform id '{id}'. Known platforms: {}", .known.join(", "))]
    UnknownPlatform { id: String, known: Vec<String> },

    /// The running system does not match any known platform
    #[error("Could not detect a supported platform for {os}/{arch}. Use --platform to select one")]
    UnsupportedHost { os: String, arch: String },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// Checksum verification failed
    #[error("Checksum verification failed for '{file}'")]
    ChecksumFailed { file: String },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },

    /// Max retries exceeded
    #[error("Download failed after {retries} retries: {url}")]
    MaxRetriesExceeded { url: String, retries: u32 },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to unpack an archive
    #[error("Failed to extract '{path}': {error}")]
    Extract { path: PathBuf, error: String },

    /// Failed to rename a path
    #[error("Failed to move '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Lint errors
#[derive(Error, Debug)]
pub enum LintError {
    /// Warning code has invalid syntax
    #[error("Invalid warning code '{code}': expected upper-case letters, digits or '_'")]
    InvalidWarningCode { code: String },

    /// No Verilog sources found
    #[error("No Verilog source files found in '{path}'")]
    NoSources { path: PathBuf },

    /// Lint tool is not installed
    #[error("Lint tool '{tool}' not found. Run 'fpgaflow packages --install' first")]
    ToolNotFound { tool: String },

    /// The lint tool could not be started or was killed
    #[error("Failed to run '{tool}': {error}")]
    Spawn { tool: String, error: String },
}
