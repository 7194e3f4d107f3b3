//! fpgaflow - FPGA development workflow front end
//!
//! Lists supported boards and FPGAs, delegates Verilog linting to an
//! external linter, and installs or uninstalls toolchain packages from a
//! per-platform manifest.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Option validation, package resolution and orchestration
//! - [`infra`] - Infrastructure layer (network, filesystem, processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
