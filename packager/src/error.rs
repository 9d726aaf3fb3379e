//! Error types for schema resolution and archive packaging.
//!
//! Every variant describes a static configuration defect or an I/O failure.
//! None are retried: the enclosing build must abort, since a partial or
//! incorrect schema archive is worse than a failed build. Variants carry the
//! module and the offending manifest key or value so the manifest can be
//! fixed directly from the message.

use camino::Utf8PathBuf;
use schemapack_common::PropertiesError;
use thiserror::Error;

use crate::module_name::ModuleName;

/// Errors that can occur while resolving manifests or writing the archive.
#[derive(Debug, Error)]
pub enum SchemaPackError {
    /// A manifest key does not have the expected namespace-URI shape.
    #[error("module {module}: manifest key `{key}` is not a schema namespace: {reason}")]
    ManifestPattern {
        /// Module whose manifest contains the key.
        module: ModuleName,
        /// The offending key.
        key: String,
        /// Why extraction failed.
        reason: String,
    },

    /// A manifest value names a resource that is not among the module's
    /// packaged resources.
    #[error("module {module}: resource `{value}` for `{key}` not found in module resources")]
    MissingResource {
        /// Module whose manifest contains the entry.
        module: ModuleName,
        /// The manifest key.
        key: String,
        /// The resource path that could not be found.
        value: String,
    },

    /// A manifest value matches more than one resource file.
    #[error("module {module}: resource `{value}` is ambiguous; candidates: {}", join_paths(.candidates))]
    AmbiguousResource {
        /// Module whose manifest contains the entry.
        module: ModuleName,
        /// The ambiguous resource path.
        value: String,
        /// Every file that matched.
        candidates: Vec<Utf8PathBuf>,
    },

    /// Two different files resolved to the same archive destination.
    #[error("archive destination `{destination}` claimed by both {existing} and {rejected}")]
    DuplicateDestination {
        /// The contested path inside the archive.
        destination: String,
        /// The file already planned at that destination.
        existing: Utf8PathBuf,
        /// The file that tried to claim it.
        rejected: Utf8PathBuf,
    },

    /// The manifest file exists but could not be read.
    #[error("module {module}: failed to read manifest {path}: {source}")]
    ManifestRead {
        /// Module that owns the manifest.
        module: ModuleName,
        /// Path of the manifest file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not valid property-file syntax.
    #[error("module {module}: invalid manifest {path}: {source}")]
    ManifestSyntax {
        /// Module that owns the manifest.
        module: ModuleName,
        /// Path of the manifest file.
        path: Utf8PathBuf,
        /// The parse failure.
        #[source]
        source: PropertiesError,
    },

    /// A resource lookup named a module the resource set does not know.
    #[error("module {module} has no registered resource directories")]
    UnknownModule {
        /// The unknown module.
        module: ModuleName,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip writer failed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

fn join_paths(paths: &[Utf8PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias using [`SchemaPackError`].
pub type Result<T> = std::result::Result<T, SchemaPackError>;
