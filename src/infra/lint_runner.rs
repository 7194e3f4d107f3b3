//! External linter invocation

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::lint::{collect_sources, LintConfig};
use crate::error::LintError;

/// Locate a linter executable
///
/// `bin/` directories of installed packages are searched before `PATH`, so
/// a toolchain installed with `packages --install` is preferred.
pub fn find_tool(tool: &str, packages_dir: &Path) -> Result<PathBuf, LintError> {
    let not_found = || LintError::ToolNotFound {
        tool: tool.to_string(),
    };

    let mut search: Vec<PathBuf> = std::fs::read_dir(packages_dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.path().join("bin"))
                .filter(|p| p.is_dir())
                .collect()
        })
        .unwrap_or_default();
    search.sort();
    if let Some(path) = std::env::var_os("PATH") {
        search.extend(std::env::split_paths(&path));
    }

    let joined: OsString = std::env::join_paths(search).map_err(|_| not_found())?;
    let cwd = std::env::current_dir().map_err(|_| not_found())?;
    which::which_in(tool, Some(joined), cwd).map_err(|_| not_found())
}

/// Lint the Verilog sources of `project_dir` and return the linter's exit code
pub fn run_lint(
    tool: &str,
    packages_dir: &Path,
    project_dir: &Path,
    config: &LintConfig,
) -> Result<i32, LintError> {
    if config.top_module.is_some() {
        tracing::warn!("--top-module is deprecated and will be removed in a future release");
    }

    let sources = collect_sources(project_dir)?;
    let executable = find_tool(tool, packages_dir)?;
    let args = config.args(&sources);

    tracing::info!("Running {} {}", executable.display(), args.join(" "));
    let status = Command::new(&executable)
        .args(&args)
        .current_dir(project_dir)
        .status()
        .map_err(|e| LintError::Spawn {
            tool: tool.to_string(),
            error: e.to_string(),
        })?;

    // A linter killed by a signal has no exit code
    Ok(status.code().unwrap_or(1))
}
