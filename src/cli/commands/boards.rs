//! CLI implementation for `fpgaflow boards` command

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::CommandFactory;

use super::{project_dir_or_current, Context};
use crate::cli::output::OutputConfig;
use crate::cli::Cli;
use crate::core::board::{format_boards, format_fpgas};

/// Execute the boards command
///
/// `--list` wins over `--fpga`; with neither the command help is printed.
pub fn execute(
    list: bool,
    fpga: bool,
    project_dir: Option<PathBuf>,
    output: OutputConfig,
) -> Result<ExitCode> {
    if !list && !fpga {
        print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = Context::load()?;
    let loader = ctx.resources();

    if list {
        if fpga {
            tracing::debug!("--list given, ignoring --fpga");
        }
        let project_dir = project_dir_or_current(project_dir)?;
        let boards = loader.boards(Some(&project_dir))?;
        if output.json {
            println!("{}", serde_json::to_string_pretty(&boards.boards)?);
        } else if !output.quiet {
            print!("{}", format_boards(&boards.boards));
        }
    } else {
        let fpgas = loader.fpgas()?;
        if output.json {
            println!("{}", serde_json::to_string_pretty(&fpgas.fpgas)?);
        } else if !output.quiet {
            print!("{}", format_fpgas(&fpgas.fpgas));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_help() -> Result<()> {
    let mut cmd = Cli::command();
    cmd.build();
    if let Some(boards) = cmd.find_subcommand_mut("boards") {
        boards.print_help()?;
    }
    Ok(())
}
