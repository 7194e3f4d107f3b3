//! Lint configuration
//!
//! Turns the lint command flags into a [`LintConfig`] and the linter command
//! line, and finds the Verilog sources of a project.

use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::LintError;

const WARNING_CODE_PATTERN: &str = r"^[A-Z][A-Z0-9_]*$";
const SOURCE_EXTENSIONS: &[&str] = &["v", "sv"];
const TESTBENCH_SUFFIX: &str = "_tb";

/// Settings handed to the external linter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintConfig {
    /// Enable every warning, including style
    pub all: bool,
    /// Disable style warnings
    pub nostyle: bool,
    /// Warning codes to disable
    pub nowarn: Vec<String>,
    /// Warning codes to enable
    pub warn: Vec<String>,
    /// Top module name
    pub top_module: Option<String>,
}

impl LintConfig {
    /// Build a configuration from raw command-line values
    ///
    /// `nowarn` and `warn` are comma separated warning code lists.
    pub fn from_flags(
        all: bool,
        nostyle: bool,
        nowarn: Option<&str>,
        warn: Option<&str>,
        top_module: Option<String>,
    ) -> Result<Self, LintError> {
        Ok(Self {
            all,
            nostyle,
            nowarn: parse_warning_codes(nowarn.unwrap_or_default())?,
            warn: parse_warning_codes(warn.unwrap_or_default())?,
            top_module,
        })
    }

    /// Linter arguments for the given sources
    pub fn args(&self, sources: &[PathBuf]) -> Vec<String> {
        let mut args = vec!["--lint-only".to_string()];

        if self.all {
            args.push("-Wall".to_string());
        }
        if self.nostyle {
            args.push("-Wno-style".to_string());
        }
        args.extend(self.nowarn.iter().map(|code| format!("-Wno-{code}")));
        args.extend(self.warn.iter().map(|code| format!("-Wwarn-{code}")));
        if let Some(top) = &self.top_module {
            args.push("--top-module".to_string());
            args.push(top.clone());
        }

        args.extend(sources.iter().map(|p| p.display().to_string()));
        args
    }
}

/// Split a comma separated warning list, rejecting malformed codes
pub fn parse_warning_codes(list: &str) -> Result<Vec<String>, LintError> {
    let re = Regex::new(WARNING_CODE_PATTERN).map_err(|e| LintError::InvalidWarningCode {
        code: e.to_string(),
    })?;

    list.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            if re.is_match(code) {
                Ok(code.to_string())
            } else {
                Err(LintError::InvalidWarningCode {
                    code: code.to_string(),
                })
            }
        })
        .collect()
}

/// Verilog sources under a project directory, sorted
///
/// Testbenches and hidden directories are skipped.
pub fn collect_sources(project_dir: &Path) -> Result<Vec<PathBuf>, LintError> {
    let mut sources: Vec<PathBuf> = WalkDir::new(project_dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_source(e.path()))
        .map(DirEntry::into_path)
        .collect();

    if sources.is_empty() {
        return Err(LintError::NoSources {
            path: project_dir.to_path_buf(),
        });
    }

    sources.sort();
    Ok(sources)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_source(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
    let is_testbench = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(TESTBENCH_SUFFIX));

    has_extension && !is_testbench
}
