//! Schema archive layout, conflict handling, and zip output.
//!
//! # Sub-modules
//!
//! - [`policy`] - How duplicate destination paths are handled.
//! - [`plan`] - The ordered set of archive entries.
//! - [`writer`] - Zip creation and archive digests.

pub mod plan;
pub mod policy;
pub mod writer;

pub use plan::{ArchiveEntry, ArchivePlan, PlanOutcome};
pub use policy::ConflictPolicy;
pub use writer::{compute_sha256, write_checksum_file, write_zip};
