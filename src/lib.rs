//! Configuration and command-line surface for the `schemapack` tool.
//!
//! The packaging logic lives in `schemapack-packager`; this crate reads
//! `schemapack.toml` and defines the CLI that drives it.

pub mod cli;
pub mod config;

pub use config::{ArchiveConfig, ConfigError, DEFAULT_CONFIG_FILE, ModuleConfig, PackConfig};
