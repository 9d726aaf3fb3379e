//! End-to-end schema archive assembly.
//!
//! Modules are resolved one at a time in the order given, each entry is laid
//! out in an [`ArchivePlan`], and the plan is written as a zip. The first
//! fatal error aborts the whole build; nothing is written until every module
//! has resolved cleanly.

use camino::Utf8PathBuf;
use log::{info, warn};

use crate::archive::{
    ArchiveEntry, ArchivePlan, ConflictPolicy, compute_sha256, write_checksum_file, write_zip,
};
use crate::error::Result;
use crate::locator::ResourceLocator;
use crate::manifest::ManifestLoader;
use crate::module_name::ModuleName;
use crate::resolver::resolve;

/// Inputs for [`build_schema_archive`].
#[derive(Debug, Clone)]
pub struct SchemaArchiveParams {
    /// Modules to resolve, in processing order.
    pub modules: Vec<ModuleName>,
    /// Where the zip is written.
    pub output: Utf8PathBuf,
    /// How duplicate destinations are handled.
    pub policy: ConflictPolicy,
    /// Also write `<output>.sha256`.
    pub write_checksum: bool,
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct ArchiveOutput {
    /// Path of the written zip.
    pub archive_path: Utf8PathBuf,
    /// Lowercase hex SHA-256 of the zip.
    pub digest: String,
    /// Number of files in the zip.
    pub entries: usize,
    /// Path of the checksum sidecar, when requested.
    pub checksum_path: Option<Utf8PathBuf>,
}

/// Resolve every module and lay the results out without writing anything.
///
/// # Errors
///
/// Returns the first resolution or conflict error encountered.
pub fn plan_schema_archive(
    modules: &[ModuleName],
    loader: &dyn ManifestLoader,
    locator: &dyn ResourceLocator,
    policy: ConflictPolicy,
) -> Result<ArchivePlan> {
    let mut plan = ArchivePlan::new(policy);
    for module in modules {
        let resolved = resolve(module, loader, locator)?;
        info!("module {module}: {} schema entries", resolved.len());
        for entry in resolved {
            plan.add(ArchiveEntry::from_resolved(entry))?;
        }
    }
    Ok(plan)
}

/// Resolve, plan, and write the schema archive.
///
/// # Errors
///
/// Returns the first resolution, conflict, or I/O error encountered. On
/// error no archive is left at `params.output`.
pub fn build_schema_archive(
    params: &SchemaArchiveParams,
    loader: &dyn ManifestLoader,
    locator: &dyn ResourceLocator,
) -> Result<ArchiveOutput> {
    let plan = plan_schema_archive(&params.modules, loader, locator, params.policy)?;
    if plan.is_empty() {
        warn!("no schema manifests found; writing an empty archive");
    }

    let entries = write_zip(&params.output, &plan)?;
    let digest = compute_sha256(&params.output)?;
    let checksum_path = if params.write_checksum {
        Some(write_checksum_file(&params.output, &digest)?)
    } else {
        None
    };

    Ok(ArchiveOutput {
        archive_path: params.output.clone(),
        digest,
        entries,
        checksum_path,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
