//! Schema manifests and the loader abstraction that supplies them.
//!
//! A manifest maps namespace identifiers to resource paths inside one
//! module. It is loaded fresh for every resolution pass and never mutated.

use schemapack_common::{Properties, PropertiesError};

use crate::error::Result;
use crate::module_name::ModuleName;

/// Well-known location of the schema manifest inside a module's resources.
pub const DEFAULT_MANIFEST_PATH: &str = "META-INF/spring.schemas";

/// A module's namespace-to-resource mapping.
///
/// # Examples
///
/// ```
/// use schemapack_packager::manifest::ModuleManifest;
///
/// let manifest = ModuleManifest::from_entries([(
///     "http://x/schema/beans/spring-beans.xsd",
///     "spring-beans.xsd",
/// )]);
/// assert_eq!(manifest.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleManifest {
    entries: Vec<(String, String)>,
}

impl ModuleManifest {
    /// Build a manifest from `(key, value)` pairs, keeping the last value of
    /// a repeated key at the key's first position.
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut manifest = Self::default();
        for (key, value) in entries {
            let (key, value) = (key.into(), value.into());
            match manifest.entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => manifest.entries.push((key, value)),
            }
        }
        manifest
    }

    /// Parse manifest text in property-file syntax.
    ///
    /// # Errors
    ///
    /// Returns the parser's error when the text contains a malformed escape.
    pub fn parse(text: &str) -> std::result::Result<Self, PropertiesError> {
        let properties = Properties::parse(text)?;
        Ok(Self::from_entries(properties.iter()))
    }

    /// Iterate over `(key, value)` pairs in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the manifest declares no schemas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of module manifests.
///
/// Implementations return `Ok(None)` for modules that ship no manifest;
/// those modules contribute nothing to the archive.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestLoader {
    /// Load the manifest for `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or parsed.
    fn load_manifest(&self, module: &ModuleName) -> Result<Option<ModuleManifest>>;
}
