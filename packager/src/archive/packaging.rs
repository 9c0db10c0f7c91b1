//! Archive packaging for a single browser target.
//!
//! Writes a deflate-compressed ZIP holding the browser-specific
//! `manifest.json` followed by every collected project file. The archive is
//! assembled in a temporary file next to its destination and renamed into
//! place only once it is complete, so a failed build never leaves a truncated
//! archive behind and never clobbers the previous one.

use super::naming::ArchiveName;
use super::packaging_error::PackagingError;
use crate::browser::Browser;
use crate::collector::{FileCollector, FileEntry};
use crate::config::SourceSet;
use crate::manifest::Manifest;
use crate::output::write_warning;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::io::{Seek, Write};
use std::time::SystemTime;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Name of the manifest entry at the archive root.
pub const MANIFEST_ENTRY: &str = "manifest.json";

/// Input parameters for the [`package_browser`] function.
///
/// Groups all required inputs so the function signature stays within
/// Clippy's parameter limit.
#[derive(Debug, Clone, Copy)]
pub struct PackageParams<'a> {
    /// The generic manifest; it is copied, never modified.
    pub manifest: &'a Manifest,
    /// The browser this archive targets.
    pub browser: Browser,
    /// Version stamped into the archive name.
    pub version: &'a str,
    /// Archive base name.
    pub base_name: &'a str,
    /// Whether documentation files are bundled.
    pub include_docs: bool,
    /// Directory that include paths are resolved against.
    pub project_root: &'a Utf8Path,
    /// Directory where the archive is written.
    pub output_dir: &'a Utf8Path,
    /// Include, documentation, and skip lists.
    pub sources: &'a SourceSet,
}

/// Output produced by [`package_browser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    /// Path to the created archive.
    pub archive_path: Utf8PathBuf,
    /// Number of entries written, including `manifest.json`.
    pub entry_count: usize,
}

/// Build the archive for `params.browser`.
///
/// Orchestrates: validate the archive name, create the output directory,
/// rewrite the manifest, stream every collected file into a staging ZIP,
/// then move the staging file over the destination.
///
/// The output directory is never walked, even when it sits inside an include
/// path. Warnings for missing include paths and duplicate archive paths go
/// to `diagnostics`.
///
/// # Errors
///
/// Returns [`PackagingError`] on naming, traversal, I/O, or ZIP failures.
/// The staging file is removed in every error case.
pub fn package_browser(
    params: &PackageParams<'_>,
    diagnostics: &mut dyn Write,
) -> Result<PackageOutput, PackagingError> {
    let name = ArchiveName::new(params.base_name, params.version, params.browser)?;

    let create_error = |source| PackagingError::CreateOutputDir {
        path: params.output_dir.to_owned(),
        source,
    };
    fs::create_dir_all(params.output_dir).map_err(create_error)?;
    let canonical_output_dir = fs::canonicalize(params.output_dir).map_err(create_error)?;
    let archive_path = params.output_dir.join(name.filename());

    let manifest = params.manifest.for_browser(params.browser);
    let files = FileCollector::new(
        params.project_root,
        params.sources,
        params.include_docs,
        diagnostics,
    )
    .excluding_dir(canonical_output_dir);

    let staging = staging_file(params.output_dir, &name)?;
    log::debug!("staging {name} at {}", staging.path().display());
    let (staging, entry_count) = write_archive(staging, &manifest, files)?;

    staging
        .persist(&archive_path)
        .map_err(|err| PackagingError::Persist {
            path: archive_path.clone(),
            source: err.error,
        })?;
    log::debug!("wrote {entry_count} entries to {archive_path}");

    Ok(PackageOutput {
        archive_path,
        entry_count,
    })
}

/// Write the manifest and every collected file into a ZIP on `writer`.
///
/// Returns the finished writer and the number of entries written. The
/// first occurrence of an archive path wins; later duplicates are reported
/// and skipped.
///
/// # Errors
///
/// Returns [`PackagingError`] if collection, reading, or encoding fails.
pub fn write_archive<W: Write + Seek>(
    writer: W,
    manifest: &Manifest,
    mut files: FileCollector<'_>,
) -> Result<(W, usize), PackagingError> {
    let mut zip = ZipWriter::new(writer);
    let mut written = HashSet::new();

    zip.start_file(MANIFEST_ENTRY, base_options())?;
    zip.write_all(manifest.to_pretty_json()?.as_bytes())?;
    written.insert(MANIFEST_ENTRY.to_owned());

    while let Some(entry) = files.next() {
        let entry = entry?;
        if written.contains(&entry.archive_path) {
            write_warning(
                files.diagnostics(),
                format_args!(
                    "duplicate archive path '{}' from {}; skipping.",
                    entry.archive_path, entry.source
                ),
            );
            continue;
        }
        append_file(&mut zip, &entry)?;
        written.insert(entry.archive_path);
    }

    let writer = zip.finish()?;
    Ok((writer, written.len()))
}

/// Stream one source file into the archive.
fn append_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &FileEntry,
) -> Result<(), PackagingError> {
    let read_error = |source: std::io::Error| PackagingError::ReadSource {
        path: entry.source.clone(),
        source,
    };
    let mut file = fs::File::open(&entry.source).map_err(read_error)?;
    let options = entry_options(&file).map_err(read_error)?;

    zip.start_file(entry.archive_path.as_str(), options)?;
    std::io::copy(&mut file, zip)?;
    log::trace!("added {}", entry.archive_path);
    Ok(())
}

fn base_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Options for one collected file: its modification time and, on Unix, its
/// permission bits.
fn entry_options(file: &fs::File) -> std::io::Result<SimpleFileOptions> {
    let metadata = file.metadata()?;
    let mut options = base_options();
    if let Some(modified) = zip_timestamp(metadata.modified()?) {
        options = options.last_modified_time(modified);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options = options.unix_permissions(metadata.permissions().mode());
    }
    Ok(options)
}

/// Convert a file time to a ZIP timestamp in local time.
///
/// ZIP timestamps cover 1980 to 2107; times outside that range yield `None`
/// and the entry keeps the writer's default.
fn zip_timestamp(time: SystemTime) -> Option<DateTime> {
    let local: chrono::DateTime<Local> = time.into();
    DateTime::try_from(local.naive_local()).ok()
}

/// Create the hidden staging file the archive is assembled in.
fn staging_file(output_dir: &Utf8Path, name: &ArchiveName) -> std::io::Result<NamedTempFile> {
    let prefix = format!(".{name}.");
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(".partial");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    builder.tempfile_in(output_dir)
}

#[cfg(test)]
#[path = "packaging_tests.rs"]
mod tests;
