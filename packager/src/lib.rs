//! Schema archive packaging.
//!
//! This crate resolves each module's schema manifest to the XSD files it
//! names and packages them into a zip laid out as `<short name>/<file>`. It
//! backs the `schemapack` CLI and can be driven programmatically with custom
//! manifest loaders and resource locators.
//!
//! # Modules
//!
//! - [`archive`] - Archive layout, conflict policy, and zip output
//! - [`error`] - Error types carrying module and manifest context
//! - [`list_output`] - Human-readable and JSON listings of a planned archive
//! - [`locator`] - Resource lookup abstraction
//! - [`manifest`] - Manifest type and loader abstraction
//! - [`module_name`] - Semantic wrapper for module names
//! - [`pipeline`] - Resolve-plan-write orchestration
//! - [`resolver`] - Namespace-to-resource resolution
//! - [`resources`] - Filesystem-backed loader and locator

pub mod archive;
pub mod error;
pub mod list_output;
pub mod locator;
pub mod manifest;
pub mod module_name;
pub mod pipeline;
pub mod resolver;
pub mod resources;

pub use error::{Result, SchemaPackError};
pub use module_name::ModuleName;
