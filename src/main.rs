//! fpgaflow CLI - FPGA development workflow front end
//!
//! Entry point for the fpgaflow command-line application.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fpgaflow::cli::output::display_error;
use fpgaflow::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output_config = cli.output_config();

    // RUST_LOG wins over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(output_config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            display_error(&e);
            ExitCode::FAILURE
        }
    }
}
