//! Project configuration loaded from `schemapack.toml`.
//!
//! The file names the modules whose schema manifests feed the archive, where
//! each module keeps its resources, and how the archive is written. Every
//! table is optional; omitted values fall back to the conventional layout
//! (`<module>/src/main/resources`, `build/distributions/schema.zip`).
//!
//! Relative paths are resolved against the directory containing the
//! configuration file, so the tool behaves the same from any working
//! directory.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use schemapack_packager::ModuleName;
use schemapack_packager::archive::ConflictPolicy;
use schemapack_packager::manifest::DEFAULT_MANIFEST_PATH;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "schemapack.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`PackConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying TOML error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// Two `[[modules]]` tables share a name.
    #[error("module `{name}` is configured more than once")]
    DuplicateModule {
        /// The repeated module name.
        name: String,
    },

    /// A `[[modules]]` table has an empty or whitespace-only name.
    #[error("module #{position} has a blank name")]
    BlankModuleName {
        /// One-based position of the offending table.
        position: usize,
    },
}

/// Top-level `schemapack.toml` contents.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackConfig {
    /// Manifest location inside every resource directory.
    pub manifest_path: Utf8PathBuf,
    /// Archive output settings.
    pub archive: ArchiveConfig,
    /// Modules contributing schemas, in processing order.
    pub modules: Vec<ModuleConfig>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            manifest_path: Utf8PathBuf::from(DEFAULT_MANIFEST_PATH),
            archive: ArchiveConfig::default(),
            modules: Vec::new(),
        }
    }
}

/// The `[archive]` table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Where the zip is written.
    pub output: Utf8PathBuf,
    /// How two schema files competing for one archive path are handled.
    pub conflict_policy: ConflictPolicy,
    /// Also write a `<output>.sha256` sidecar.
    pub checksum: bool,
}

impl ArchiveConfig {
    const DEFAULT_OUTPUT: &'static str = "build/distributions/schema.zip";
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            output: Utf8PathBuf::from(Self::DEFAULT_OUTPUT),
            conflict_policy: ConflictPolicy::default(),
            checksum: false,
        }
    }
}

/// One `[[modules]]` table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Module identifier, used in diagnostics and listings.
    pub name: String,
    /// Resource directories searched for the manifest and schema files.
    ///
    /// Empty means `<name>/src/main/resources`.
    #[serde(default)]
    pub resource_dirs: Vec<Utf8PathBuf>,
}

impl ModuleConfig {
    /// The directories this module's resources live in.
    #[must_use]
    pub fn effective_resource_dirs(&self) -> Vec<Utf8PathBuf> {
        if self.resource_dirs.is_empty() {
            vec![Utf8Path::new(&self.name).join("src/main/resources")]
        } else {
            self.resource_dirs.clone()
        }
    }
}

impl PackConfig {
    /// Reads, validates, and anchors the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read,
    /// [`ConfigError::Parse`] when it is not valid, and a validation error
    /// for blank or duplicated module names.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8Path;
    /// use schemapack::PackConfig;
    ///
    /// let config = PackConfig::load(Utf8Path::new("schemapack.toml"))?;
    /// println!("{} modules", config.modules.len());
    /// # Ok::<(), schemapack::ConfigError>(())
    /// ```
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |source| std::fs::read_to_string(source.as_std_path()))
    }

    /// Loads configuration using the supplied reader.
    ///
    /// The reader receives the configuration path and returns its text,
    /// which lets tests supply configuration without touching the file
    /// system.
    ///
    /// # Errors
    ///
    /// As for [`Self::load`].
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use schemapack::PackConfig;
    ///
    /// let config = PackConfig::load_with(Utf8Path::new("/work/schemapack.toml"), |_| {
    ///     Ok("[[modules]]\nname = \"beans\"\n".to_owned())
    /// })
    /// .expect("valid configuration");
    /// assert_eq!(
    ///     config.modules[0].resource_dirs,
    ///     vec![camino::Utf8PathBuf::from("/work/beans/src/main/resources")]
    /// );
    /// ```
    pub fn load_with<F>(path: &Utf8Path, reader: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Utf8Path) -> std::io::Result<String>,
    {
        let text = reader(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let parsed: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source: Box::new(source),
        })?;
        parsed.validate()?;

        let base = path.parent().unwrap_or_else(|| Utf8Path::new(""));
        Ok(parsed.anchored_at(base))
    }

    /// Module names in processing order.
    #[must_use]
    pub fn module_names(&self) -> Vec<ModuleName> {
        self.modules
            .iter()
            .map(|module| ModuleName::from(module.name.as_str()))
            .collect()
    }

    /// Each module paired with its resource directories.
    #[must_use]
    pub fn resource_roots(&self) -> Vec<(ModuleName, Vec<Utf8PathBuf>)> {
        self.modules
            .iter()
            .map(|module| {
                (
                    ModuleName::from(module.name.as_str()),
                    module.effective_resource_dirs(),
                )
            })
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for (index, module) in self.modules.iter().enumerate() {
            if module.name.trim().is_empty() {
                return Err(ConfigError::BlankModuleName {
                    position: index + 1,
                });
            }
            if !seen.insert(module.name.as_str()) {
                return Err(ConfigError::DuplicateModule {
                    name: module.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Rewrites relative directories against `base` and fills in default
    /// resource directories.
    fn anchored_at(self, base: &Utf8Path) -> Self {
        let anchor = |path: Utf8PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };

        let modules = self
            .modules
            .into_iter()
            .map(|module| ModuleConfig {
                resource_dirs: module
                    .effective_resource_dirs()
                    .into_iter()
                    .map(anchor)
                    .collect(),
                name: module.name,
            })
            .collect();

        Self {
            manifest_path: self.manifest_path,
            archive: ArchiveConfig {
                output: anchor(self.archive.output),
                ..self.archive
            },
            modules,
        }
    }
}
