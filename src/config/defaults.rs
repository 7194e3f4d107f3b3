//! Default configuration values

/// Maximum number of download retry attempts
pub const MAX_DOWNLOAD_RETRIES: u32 = 3;

/// Base delay between download attempts, doubled after each failure
pub const DOWNLOAD_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Default linter executable
pub const LINT_TOOL: &str = "verilator";

/// Marker file written into every installed package directory
pub const PACKAGE_MARKER: &str = "package.toml";

/// Project-local board table merged over the built-in one
pub const PROJECT_BOARDS_FILE: &str = "boards.toml";
