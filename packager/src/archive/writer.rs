//! Zip output for a finished [`ArchivePlan`].
//!
//! The archive is assembled in a temporary file beside the destination and
//! moved into place only once complete, so a failed build never leaves a
//! truncated archive behind. Entry timestamps are fixed, making the output
//! byte-for-byte reproducible for identical inputs.

use std::fs;
use std::io::{self, Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::plan::ArchivePlan;
use crate::error::Result;

/// Write every planned entry into a zip archive at `output`.
///
/// Parent directories are created as needed and an existing file at
/// `output` is replaced. Returns the number of entries written.
///
/// # Errors
///
/// Returns [`crate::error::SchemaPackError::Io`] if a source file cannot be
/// read or the archive cannot be written, and
/// [`crate::error::SchemaPackError::Archive`] if the zip writer fails.
pub fn write_zip(output: &Utf8Path, plan: &ArchivePlan) -> Result<usize> {
    let parent = output
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    fs::create_dir_all(parent)?;

    let staging = staging_file(parent)?;
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(staging.reopen()?);
    for entry in plan.entries() {
        debug!("adding {} as {}", entry.source_file, entry.destination);
        zip.start_file(entry.destination.as_str(), options)?;
        let mut source = fs::File::open(&entry.source_file)?;
        io::copy(&mut source, &mut zip)?;
    }
    zip.finish()?.flush()?;

    staging.persist(output).map_err(|error| error.error)?;
    info!("wrote {} schema files to {output}", plan.len());
    Ok(plan.len())
}

/// Create the temporary file the archive is assembled in.
///
/// `tempfile` defaults to owner-only access; the finished archive is a
/// distribution artefact and takes the usual `0644`, narrowed by the umask.
#[cfg(unix)]
fn staging_file(dir: &Utf8Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .prefix(".schema-archive")
        .permissions(fs::Permissions::from_mode(0o644))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn staging_file(dir: &Utf8Path) -> io::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(".schema-archive")
        .tempfile_in(dir)
}

/// Compute the SHA-256 digest of a file as lowercase hex.
///
/// # Errors
///
/// Returns [`crate::error::SchemaPackError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write `<archive>.sha256` in the conventional `<digest>  <file name>` form.
///
/// # Errors
///
/// Returns [`crate::error::SchemaPackError::Io`] if the sidecar cannot be
/// written.
pub fn write_checksum_file(archive: &Utf8Path, digest: &str) -> Result<Utf8PathBuf> {
    let file_name = archive.file_name().unwrap_or(archive.as_str());
    let sidecar = Utf8PathBuf::from(format!("{archive}.sha256"));
    fs::write(&sidecar, format!("{digest}  {file_name}\n"))?;
    Ok(sidecar)
}
