//! CLI implementation for `fpgaflow lint` command

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;

use super::{project_dir_or_current, Context};
use crate::core::lint::LintConfig;
use crate::infra::lint_runner::run_lint;

/// Raw lint flags
#[derive(Debug, Clone, Default)]
pub struct LintOptions {
    pub all: bool,
    pub nostyle: bool,
    pub nowarn: Option<String>,
    pub warn: Option<String>,
    pub top_module: Option<String>,
}

/// Execute the lint command; the exit code is the linter's
pub fn execute(options: LintOptions, project_dir: Option<PathBuf>) -> Result<ExitCode> {
    let config = LintConfig::from_flags(
        options.all,
        options.nostyle,
        options.nowarn.as_deref(),
        options.warn.as_deref(),
        options.top_module,
    )?;

    let ctx = Context::load()?;
    let project_dir = project_dir_or_current(project_dir)?;
    let code = run_lint(
        ctx.config.lint_tool(),
        &ctx.config.packages_dir(&ctx.dirs),
        &project_dir,
        &config,
    )?;

    tracing::info!("Linter exited with {code}");
    Ok(ExitCode::from(exit_status(code)))
}

/// Process exit status for a linter exit code
///
/// Codes in `0..=255` pass through unchanged. Anything wider, as Windows
/// allows, cannot be returned from `main` and becomes 1.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or_else(|_| {
        tracing::warn!("Linter exit code {code} is out of range, exiting with 1");
        1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_passes_byte_codes_through() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(7), 7);
        assert_eq!(exit_status(255), 255);
    }

    #[test]
    fn test_exit_status_out_of_range_is_failure() {
        assert_eq!(exit_status(256), 1);
        assert_eq!(exit_status(-1073741819), 1);
    }
}
