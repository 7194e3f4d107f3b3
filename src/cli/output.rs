//! Output formatting and progress indicators
//!
//! Verbosity handling, error display and the download progress bar.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::infra::download::ProgressCallback;

/// Output settings derived from the global flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything except errors
    pub quiet: bool,
    /// Machine-readable output for listings
    pub json: bool,
    /// Number of `-v` flags
    pub verbosity: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, json: bool, verbosity: u8) -> Self {
        Self {
            quiet,
            json,
            verbosity,
        }
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Show progress bars only for interactive, human-readable runs
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json && std::io::stderr().is_terminal()
    }
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  Caused by: {cause}");
    }
}

/// Create a progress bar for downloads
pub fn create_download_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg:>16} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// Progress callback drawing a download bar labelled with a package name
pub fn download_progress(name: &str) -> ProgressCallback {
    let pb = create_download_bar(0);
    pb.set_message(name.to_string());
    Box::new(move |downloaded, total| {
        if total > 0 && pb.length() != Some(total) {
            pb.set_length(total);
        }
        pb.set_position(downloaded);
        if total > 0 && downloaded >= total {
            pb.finish_and_clear();
        }
    })
}

/// Status message prefixes
pub mod status {
    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}
