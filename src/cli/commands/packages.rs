//! CLI implementation for `fpgaflow packages` command
//!
//! Options are validated before any resource or configuration is loaded.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Args;

use super::Context;
use crate::cli::output::{download_progress, status, OutputConfig};
use crate::config::defaults::DOWNLOAD_RETRY_BASE_DELAY_MS;
use crate::core::options::{OptionSet, PackagesAction, Presence};
use crate::core::orchestrator::{format_package_list, BatchReport, Orchestrator, PackageOutcome};
use crate::core::resolver::resolve;
use crate::infra::download::DownloadManager;
use crate::infra::installer::ToolchainStore;
use crate::infra::prompt::StdinPrompt;

/// Arguments of the packages command
#[derive(Args, Debug, Default)]
pub struct PackagesArgs {
    /// List packages and their installed state
    #[arg(short, long)]
    pub list: bool,

    /// Install packages (all when none are named)
    #[arg(short, long)]
    pub install: bool,

    /// Uninstall packages (all when none are named)
    #[arg(short, long)]
    pub uninstall: bool,

    /// Reinstall packages that are already installed
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub force: Option<bool>,

    /// Platform id to act for instead of the detected one
    #[arg(short, long, value_name = "ID", env = "FPGAFLOW_PLATFORM")]
    pub platform: Option<String>,

    /// Answer yes to the uninstall confirmation
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub yes: Option<bool>,

    /// Print every step of the install or uninstall
    #[arg(long)]
    pub verbose: bool,

    /// Packages as NAME or NAME@VERSION
    #[arg(value_name = "PACKAGES")]
    pub packages: Vec<String>,
}

impl PackagesArgs {
    /// Presence-aware view of the parsed flags
    pub fn option_set(&self) -> OptionSet {
        OptionSet {
            list: Presence::from_switch(self.list),
            install: Presence::from_switch(self.install),
            uninstall: Presence::from_switch(self.uninstall),
            force: Presence::from_optional(self.force),
            yes: Presence::from_optional(self.yes),
            verbose: Presence::from_switch(self.verbose),
            platform: self.platform.clone(),
            packages: self.packages.clone(),
        }
    }
}

/// Execute the packages command
pub fn execute(args: PackagesArgs, output: OutputConfig) -> Result<ExitCode> {
    let options = args.option_set();
    let action = options.validate()?;

    let ctx = Context::load()?;
    let manifest = ctx
        .resources()
        .platform_manifest(ctx.config.platform_override(options.platform.as_deref()))?;

    let downloader =
        DownloadManager::with_config(ctx.config.download_retries(), DOWNLOAD_RETRY_BASE_DELAY_MS);
    let mut store = ToolchainStore::new(
        ctx.config.packages_dir(&ctx.dirs),
        ctx.dirs.downloads_dir(),
        downloader,
    )
    .context("Failed to start the download runtime")?;
    if output.show_progress() {
        store = store.with_progress(Box::new(download_progress));
    }
    tracing::debug!("Packages directory: {}", store.packages_dir().display());

    let orchestrator = Orchestrator::new(&manifest, &store, options.verbose.value());

    match action {
        PackagesAction::List => {
            let statuses = orchestrator.list();
            if output.json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else if !output.quiet {
                print!("{}", format_package_list(manifest.platform_id(), &statuses));
            }
            Ok(ExitCode::SUCCESS)
        }
        PackagesAction::Install => {
            let resolution = resolve(&options.packages, &manifest)?;
            let mut out = report_writer(output);
            let report = orchestrator.install(&resolution, options.force.value(), &mut out)?;
            Ok(finish(&report, output))
        }
        PackagesAction::Uninstall => {
            let resolution = resolve(&options.packages, &manifest)?;
            let mut out = report_writer(output);
            let report = orchestrator.uninstall(
                &resolution,
                options.yes.value(),
                &mut StdinPrompt,
                &mut out,
            )?;
            Ok(finish(&report, output))
        }
    }
}

fn report_writer(output: OutputConfig) -> Box<dyn Write> {
    if output.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout().lock())
    }
}

/// Exit status of a batch; quiet runs still report failures on stderr
fn finish(report: &BatchReport, output: OutputConfig) -> ExitCode {
    if output.quiet {
        for result in &report.results {
            if let PackageOutcome::Failed { error } = &result.outcome {
                eprintln!("{} {error}", status::ERROR);
            }
        }
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
