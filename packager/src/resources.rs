//! Filesystem-backed module resources.
//!
//! Each module owns one or more resource roots (conventionally
//! `src/main/resources`). Roots are indexed once, recursively, when the
//! resource set is built; manifests are read on demand.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use schemapack_common::{decode_properties, ends_with_components};

use crate::error::{Result, SchemaPackError};
use crate::locator::ResourceLocator;
use crate::manifest::{ManifestLoader, ModuleManifest};
use crate::module_name::ModuleName;

/// A single indexed resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexedResource {
    /// Path relative to its root, using the platform separator.
    relative: Utf8PathBuf,
    /// Path on disk.
    absolute: Utf8PathBuf,
}

/// The resource roots and file index of one module.
#[derive(Debug, Clone, Default)]
struct ModuleIndex {
    roots: Vec<Utf8PathBuf>,
    files: Vec<IndexedResource>,
}

/// Resource directories for a set of modules.
///
/// Implements both [`ManifestLoader`] and [`ResourceLocator`] over the
/// filesystem.
#[derive(Debug, Clone)]
pub struct FileSystemResources {
    manifest_path: Utf8PathBuf,
    modules: BTreeMap<ModuleName, ModuleIndex>,
}

impl FileSystemResources {
    /// Index the resource roots of every module.
    ///
    /// Roots that do not exist are skipped with a warning; a module may
    /// legitimately have no resources at all.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing root cannot be walked; non-UTF-8 file
    /// names surface as I/O errors.
    pub fn scan<I>(manifest_path: impl Into<Utf8PathBuf>, modules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ModuleName, Vec<Utf8PathBuf>)>,
    {
        let mut indexed = BTreeMap::new();
        for (module, roots) in modules {
            let mut index = ModuleIndex::default();
            for root in roots {
                if root.is_dir() {
                    index_root(&root, &root, &mut index.files)?;
                } else {
                    warn!("module {module}: resource directory {root} does not exist");
                }
                index.roots.push(root);
            }
            debug!("module {module}: indexed {} resource files", index.files.len());
            indexed.insert(module, index);
        }

        Ok(Self {
            manifest_path: manifest_path.into(),
            modules: indexed,
        })
    }

    fn module(&self, module: &ModuleName) -> Result<&ModuleIndex> {
        self.modules
            .get(module)
            .ok_or_else(|| SchemaPackError::UnknownModule {
                module: module.clone(),
            })
    }
}

impl ManifestLoader for FileSystemResources {
    fn load_manifest(&self, module: &ModuleName) -> Result<Option<ModuleManifest>> {
        let index = self.module(module)?;
        let Some(path) = index
            .roots
            .iter()
            .map(|root| root.join(&self.manifest_path))
            .find(|candidate| candidate.is_file())
        else {
            debug!("module {module}: no {} present", self.manifest_path);
            return Ok(None);
        };

        let bytes = std::fs::read(&path).map_err(|source| SchemaPackError::ManifestRead {
            module: module.clone(),
            path: path.clone(),
            source,
        })?;
        let manifest = ModuleManifest::parse(&decode_properties(&bytes)).map_err(|source| {
            SchemaPackError::ManifestSyntax {
                module: module.clone(),
                path: path.clone(),
                source,
            }
        })?;
        debug!("module {module}: loaded {} entries from {path}", manifest.len());
        Ok(Some(manifest))
    }
}

impl ResourceLocator for FileSystemResources {
    fn find_by_suffix(&self, module: &ModuleName, suffix: &str) -> Result<Vec<Utf8PathBuf>> {
        let index = self.module(module)?;
        Ok(index
            .files
            .iter()
            .filter(|file| ends_with_components(file.relative.as_str(), suffix))
            .map(|file| file.absolute.clone())
            .collect())
    }
}

/// Recursively collect regular files beneath `dir`.
///
/// Entries are visited in name order so lookups are deterministic.
fn index_root(root: &Utf8Path, dir: &Utf8Path, files: &mut Vec<IndexedResource>) -> Result<()> {
    let mut entries = dir
        .read_dir_utf8()?
        .map(|entry| entry.map(|found| found.path().to_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            index_root(root, &path, files)?;
        } else if path.is_file() {
            let relative = path
                .strip_prefix(root)
                .map_or_else(|_| path.clone(), Utf8Path::to_path_buf);
            files.push(IndexedResource {
                relative,
                absolute: path,
            });
        }
    }
    Ok(())
}
