//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use commands::Commands;
use output::OutputConfig;

/// fpgaflow - FPGA development workflow front end
///
/// List boards and FPGAs, lint Verilog sources and manage toolchain packages.
#[derive(Parser, Debug)]
#[command(name = "fpgaflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log output (-v for info, -vv for debug)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output listings in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Output settings selected by the global flags
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.json, self.verbosity)
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<ExitCode> {
        tracing::debug!("{}", build_info());
        let output = self.output_config();
        if let Some(cmd) = self.command {
            cmd.run(output)
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Version and build metadata recorded by the build script
pub fn build_info() -> String {
    format!(
        "fpgaflow {} (git {}, built {} for {}, rustc {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown"),
    )
}
