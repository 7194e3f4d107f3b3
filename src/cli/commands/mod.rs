//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod boards;
pub mod lint;
pub mod packages;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Subcommand;

use crate::cli::output::OutputConfig;
use crate::core::global_config::GlobalConfig;
use crate::infra::dirs::FpgaflowDirs;
use crate::infra::resources::ResourceLoader;

pub use packages::PackagesArgs;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported boards and FPGAs
    Boards {
        /// List supported boards
        #[arg(short, long)]
        list: bool,

        /// List supported FPGAs
        #[arg(short, long)]
        fpga: bool,

        /// Project directory with an optional boards.toml
        #[arg(short = 'p', long, value_name = "DIR")]
        project_dir: Option<PathBuf>,
    },

    /// Lint the Verilog sources of a project
    Lint {
        /// Enable all warnings, including code style warnings
        #[arg(short, long)]
        all: bool,

        /// Disable all style warnings
        #[arg(long)]
        nostyle: bool,

        /// Disable specific warnings (comma separated)
        #[arg(long, value_name = "CODES")]
        nowarn: Option<String>,

        /// Enable specific warnings (comma separated)
        #[arg(long, value_name = "CODES")]
        warn: Option<String>,

        /// Top module name (deprecated)
        #[arg(short, long, value_name = "NAME")]
        top_module: Option<String>,

        /// Project directory
        #[arg(short = 'p', long, value_name = "DIR")]
        project_dir: Option<PathBuf>,
    },

    /// Install, uninstall or list toolchain packages
    Packages(PackagesArgs),
}

impl Commands {
    /// Execute the command
    pub fn run(self, output: OutputConfig) -> Result<ExitCode> {
        match self {
            Self::Boards {
                list,
                fpga,
                project_dir,
            } => boards::execute(list, fpga, project_dir, output),
            Self::Lint {
                all,
                nostyle,
                nowarn,
                warn,
                top_module,
                project_dir,
            } => {
                let options = lint::LintOptions {
                    all,
                    nostyle,
                    nowarn,
                    warn,
                    top_module,
                };
                lint::execute(options, project_dir)
            }
            Self::Packages(args) => packages::execute(args, output),
        }
    }
}

/// Directories and configuration shared by every command
pub(crate) struct Context {
    pub dirs: FpgaflowDirs,
    pub config: GlobalConfig,
}

impl Context {
    /// Resolve directories and load `config.toml`
    pub fn load() -> Result<Self> {
        let dirs = FpgaflowDirs::new();
        let config = GlobalConfig::load(&dirs).context("Invalid global configuration")?;
        Ok(Self { dirs, config })
    }

    /// Resource loader honouring the configured override directory
    pub fn resources(&self) -> ResourceLoader {
        ResourceLoader::new(self.config.resources_dir())
    }
}

/// The given project directory, or the current directory
pub(crate) fn project_dir_or_current(project_dir: Option<PathBuf>) -> Result<PathBuf> {
    match project_dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}
