//! Namespace-to-resource resolution for schema manifests.
//!
//! One resolution pass turns a module's manifest into [`ResolvedEntry`]
//! values: the short name extracted from each namespace key paired with the
//! single resource file its value names. The pass only reads; archive layout
//! and conflict handling happen later in [`crate::archive`].

use camino::Utf8PathBuf;
use log::debug;
use schemapack_common::{backslashed, extract_short_name};

use crate::error::{Result, SchemaPackError};
use crate::locator::ResourceLocator;
use crate::manifest::ManifestLoader;
use crate::module_name::ModuleName;

/// A manifest entry paired with the file it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Module that declared the entry.
    pub module: ModuleName,
    /// The namespace key as written in the manifest.
    pub key: String,
    /// Short name extracted from the key; the archive directory.
    pub short_name: String,
    /// The resource file, confirmed to exist when resolved.
    pub source_file: Utf8PathBuf,
}

/// Resolve every manifest entry of `module`.
///
/// A module without a manifest contributes no entries. Entries come back in
/// manifest order.
///
/// # Errors
///
/// - [`SchemaPackError::ManifestPattern`] when a key is not a schema
///   namespace.
/// - [`SchemaPackError::MissingResource`] when no resource file matches a
///   value under either separator convention.
/// - [`SchemaPackError::AmbiguousResource`] when more than one does.
/// - Any error raised by the loader or locator.
pub fn resolve(
    module: &ModuleName,
    loader: &dyn ManifestLoader,
    locator: &dyn ResourceLocator,
) -> Result<Vec<ResolvedEntry>> {
    let Some(manifest) = loader.load_manifest(module)? else {
        return Ok(Vec::new());
    };

    manifest
        .iter()
        .map(|(key, value)| resolve_entry(module, key, value, locator))
        .collect()
}

fn resolve_entry(
    module: &ModuleName,
    key: &str,
    value: &str,
    locator: &dyn ResourceLocator,
) -> Result<ResolvedEntry> {
    let short_name = extract_short_name(key).map_err(|error| SchemaPackError::ManifestPattern {
        module: module.clone(),
        key: key.to_owned(),
        reason: error.to_string(),
    })?;

    let source_file = locate_single(module, key, value, locator)?;
    debug!("module {module}: {key} -> {short_name} ({source_file})");

    Ok(ResolvedEntry {
        module: module.clone(),
        key: key.to_owned(),
        short_name,
        source_file,
    })
}

/// Find the one resource file recorded as `value`, trying the value as
/// written and with `/` replaced by `\`.
fn locate_single(
    module: &ModuleName,
    key: &str,
    value: &str,
    locator: &dyn ResourceLocator,
) -> Result<Utf8PathBuf> {
    let mut candidates = locator.find_by_suffix(module, value)?;
    let alternate = backslashed(value);
    if alternate != value {
        candidates.extend(locator.find_by_suffix(module, &alternate)?);
    }
    candidates.sort();
    candidates.dedup();

    let mut found = candidates.into_iter();
    match (found.next(), found.next()) {
        (Some(file), None) => Ok(file),
        (None, _) => Err(SchemaPackError::MissingResource {
            module: module.clone(),
            key: key.to_owned(),
            value: value.to_owned(),
        }),
        (Some(first), Some(second)) => Err(SchemaPackError::AmbiguousResource {
            module: module.clone(),
            value: value.to_owned(),
            candidates: [first, second].into_iter().chain(found).collect(),
        }),
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
