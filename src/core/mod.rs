//! Core business logic module
//!
//! Validation, resolution and orchestration for fpgaflow. Disk and network
//! access sit behind traits implemented in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`options`] - `packages` flag combination rules
//! - [`spec`] - `name[@version]` package specs
//! - [`manifest`] - Package tables and per-platform manifests
//! - [`resolver`] - Package spec resolution against a manifest
//! - [`orchestrator`] - Install/uninstall batches and package listing
//! - [`board`] - Board and FPGA tables
//! - [`platform`] - Platform ids and host detection
//! - [`lint`] - Lint configuration and source discovery
//! - [`global_config`] - Global configuration management

pub mod board;
pub mod global_config;
pub mod lint;
pub mod manifest;
pub mod options;
pub mod orchestrator;
pub mod platform;
pub mod resolver;
pub mod spec;
