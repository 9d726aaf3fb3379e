//! Ordered archive layout keyed by destination path.
//!
//! Each resolved entry lands at `<short_name>/<file name>`; extraction has
//! already rejected short names with empty, `.` or `..` components, so every
//! destination stays relative. Short names may repeat across modules, so two
//! different files can claim one destination; the plan's [`ConflictPolicy`] decides what happens then.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Serialize;

use super::policy::ConflictPolicy;
use crate::error::{Result, SchemaPackError};
use crate::module_name::ModuleName;
use crate::resolver::ResolvedEntry;

/// A file placed at a destination inside the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    /// Path inside the archive, always `/`-separated.
    pub destination: String,
    /// File on disk supplying the contents.
    pub source_file: Utf8PathBuf,
    /// Module that contributed the file.
    pub module: ModuleName,
    /// Short name the destination directory was derived from.
    pub short_name: String,
}

impl ArchiveEntry {
    /// Lay out a resolved entry as `<short_name>/<file name>`.
    #[must_use]
    pub fn from_resolved(entry: ResolvedEntry) -> Self {
        let file_name = schemapack_common::file_name(entry.source_file.as_str()).to_owned();
        Self {
            destination: format!("{}/{file_name}", entry.short_name),
            source_file: entry.source_file,
            module: entry.module,
            short_name: entry.short_name,
        }
    }
}

/// What [`ArchivePlan::add`] did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The destination was free.
    Added,
    /// The same file was already planned at this destination.
    Repeated,
    /// A different file held the destination and was kept.
    Excluded,
    /// A different file held the destination and was replaced.
    Replaced,
}

/// The ordered set of entries to be written.
#[derive(Debug, Clone, Default)]
pub struct ArchivePlan {
    policy: ConflictPolicy,
    entries: Vec<ArchiveEntry>,
}

impl ArchivePlan {
    /// Create an empty plan governed by `policy`.
    #[must_use]
    pub const fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            entries: Vec::new(),
        }
    }

    /// Add an entry, applying the conflict policy.
    ///
    /// Reaching the same file twice (a versioned and an unversioned
    /// namespace mapped to one schema) is not a conflict under any policy.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaPackError::DuplicateDestination`] under
    /// [`ConflictPolicy::Error`] when a different file already holds the
    /// destination.
    pub fn add(&mut self, entry: ArchiveEntry) -> Result<PlanOutcome> {
        let Some(existing) = self
            .entries
            .iter_mut()
            .find(|planned| planned.destination == entry.destination)
        else {
            self.entries.push(entry);
            return Ok(PlanOutcome::Added);
        };

        if existing.source_file == entry.source_file {
            return Ok(PlanOutcome::Repeated);
        }

        match self.policy {
            ConflictPolicy::Exclude => {
                debug!(
                    "excluding {} from module {}: {} already provided by {}",
                    entry.source_file, entry.module, entry.destination, existing.source_file
                );
                Ok(PlanOutcome::Excluded)
            }
            ConflictPolicy::Overwrite => {
                debug!(
                    "{} from module {} replaces {} at {}",
                    entry.source_file, entry.module, existing.source_file, entry.destination
                );
                *existing = entry;
                Ok(PlanOutcome::Replaced)
            }
            ConflictPolicy::Error => Err(SchemaPackError::DuplicateDestination {
                destination: entry.destination,
                existing: existing.source_file.clone(),
                rejected: entry.source_file,
            }),
        }
    }

    /// The policy governing this plan.
    #[must_use]
    pub const fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Planned entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// The source planned at `destination`, if any.
    #[must_use]
    pub fn source_for(&self, destination: &str) -> Option<&Utf8Path> {
        self.entries
            .iter()
            .find(|entry| entry.destination == destination)
            .map(|entry| entry.source_file.as_path())
    }

    /// Number of planned entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is planned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
