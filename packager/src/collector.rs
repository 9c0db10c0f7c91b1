//! Lazy enumeration of the project files that go into an archive.
//!
//! [`FileCollector`] is a pull-based iterator over the configured include
//! paths. Directories are walked on demand, so only one directory handle
//! stack is alive at a time regardless of tree size. Missing include paths
//! and documentation files are reported on the diagnostic stream and
//! skipped.

use crate::config::SourceSet;
use crate::output::write_warning;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while walking an include directory.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A directory entry could not be read.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// The path being visited when the error occurred.
        path: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// A file path is not valid UTF-8 and cannot be named in the archive.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// A walked file does not live under the project root.
    #[error("{path} is outside the project root {root}")]
    OutsideRoot {
        /// The offending path.
        path: Utf8PathBuf,
        /// The project root.
        root: Utf8PathBuf,
    },
}

/// One file to be written into an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Location inside the archive, `/`-separated.
    pub archive_path: String,
    /// Absolute location on disk.
    pub source: Utf8PathBuf,
}

/// Iterator over the files selected by a [`SourceSet`].
///
/// Items arrive in include-list order. Within a directory, children are
/// visited in file-name order, depth first. Documentation files follow the
/// include paths when requested.
pub struct FileCollector<'a> {
    root: &'a Utf8Path,
    sources: &'a SourceSet,
    includes: std::slice::Iter<'a, String>,
    docs: std::slice::Iter<'a, String>,
    walk: Option<walkdir::IntoIter>,
    excluded_dir: Option<PathBuf>,
    diagnostics: &'a mut dyn Write,
}

impl<'a> FileCollector<'a> {
    /// Start collecting files under `root`.
    ///
    /// Warnings for missing paths are written to `diagnostics` as the
    /// iterator reaches them.
    #[must_use]
    pub fn new(
        root: &'a Utf8Path,
        sources: &'a SourceSet,
        include_docs: bool,
        diagnostics: &'a mut dyn Write,
    ) -> Self {
        let docs: &'a [String] = if include_docs { &sources.docs } else { &[] };
        Self {
            root,
            sources,
            includes: sources.include.iter(),
            docs: docs.iter(),
            walk: None,
            excluded_dir: None,
            diagnostics,
        }
    }

    /// Never descend into `dir`, wherever it appears below an include path.
    ///
    /// `dir` is compared against canonicalised directory paths, so it should
    /// itself be canonical. The archive output directory is excluded this
    /// way so that staging files and earlier archives are not packaged.
    #[must_use]
    pub fn excluding_dir(mut self, dir: PathBuf) -> Self {
        self.excluded_dir = Some(dir);
        self
    }

    /// Borrow the diagnostic stream the collector reports to.
    pub fn diagnostics(&mut self) -> &mut dyn Write {
        &mut *self.diagnostics
    }

    /// Resolve one include path, yielding it directly when it is a file.
    ///
    /// Directories start a walk that subsequent calls to `next` drain.
    fn open_include(&mut self, include: &str) -> Option<Result<FileEntry, CollectError>> {
        let full = self.root.join(include);
        if !full.exists() {
            write_warning(
                self.diagnostics,
                format_args!("expected path '{include}' not found; skipping."),
            );
            return None;
        }
        if full.is_file() {
            return Some(Ok(direct_entry(include, full)));
        }
        log::debug!("walking {full}");
        self.walk = Some(WalkDir::new(&full).sort_by_file_name().into_iter());
        None
    }

    fn open_doc(&mut self, doc: &str) -> Option<FileEntry> {
        let full = self.root.join(doc);
        if full.is_file() {
            return Some(direct_entry(doc, full));
        }
        write_warning(
            self.diagnostics,
            format_args!("requested doc '{doc}' not found; skipping."),
        );
        None
    }
}

impl Iterator for FileCollector<'_> {
    type Item = Result<FileEntry, CollectError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(walk) = &mut self.walk {
                let excluded_dir = self.excluded_dir.as_deref();
                if let Some(item) = next_walked(walk, self.root, self.sources, excluded_dir) {
                    return Some(item);
                }
                self.walk = None;
            }

            if let Some(include) = self.includes.next() {
                if let Some(item) = self.open_include(include) {
                    return Some(item);
                }
                continue;
            }

            let doc = self.docs.next()?;
            if let Some(entry) = self.open_doc(doc) {
                return Some(Ok(entry));
            }
        }
    }
}

/// Advance a directory walk to its next packageable file.
fn next_walked(
    walk: &mut walkdir::IntoIter,
    root: &Utf8Path,
    sources: &SourceSet,
    excluded_dir: Option<&Path>,
) -> Option<Result<FileEntry, CollectError>> {
    loop {
        let entry = match walk.next()? {
            Ok(entry) => entry,
            Err(source) => {
                let path = source.path().map(PathBuf::from).unwrap_or_default();
                return Some(Err(CollectError::Walk { path, source }));
            }
        };

        let skipped = entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| sources.is_skipped(name));
        if skipped {
            log::trace!("skipping {}", entry.path().display());
            if entry.file_type().is_dir() {
                walk.skip_current_dir();
            }
            continue;
        }

        if entry.file_type().is_dir() {
            if is_excluded_dir(entry.path(), excluded_dir) {
                log::debug!("not descending into output directory {}", entry.path().display());
                walk.skip_current_dir();
            }
            continue;
        }
        // Symlinks are never descended into; only those naming a file count.
        if entry.path_is_symlink() && !entry.path().is_file() {
            continue;
        }

        return Some(walked_entry(root, entry.into_path()));
    }
}

fn is_excluded_dir(path: &Path, excluded_dir: Option<&Path>) -> bool {
    excluded_dir.is_some_and(|excluded| {
        std::fs::canonicalize(path).is_ok_and(|canonical| canonical == excluded)
    })
}

fn walked_entry(root: &Utf8Path, path: PathBuf) -> Result<FileEntry, CollectError> {
    let source = Utf8PathBuf::try_from(path)
        .map_err(|err| CollectError::NonUtf8Path {
            path: err.into_path_buf(),
        })?;
    let relative = source
        .strip_prefix(root)
        .map_err(|_| CollectError::OutsideRoot {
            path: source.clone(),
            root: root.to_owned(),
        })?;
    let archive_path = archive_path(relative);
    log::debug!("collected {archive_path}");
    Ok(FileEntry {
        archive_path,
        source,
    })
}

fn direct_entry(relative: &str, source: Utf8PathBuf) -> FileEntry {
    let archive_path = archive_path(Utf8Path::new(relative));
    log::debug!("collected {archive_path}");
    FileEntry {
        archive_path,
        source,
    }
}

/// Render a project-relative path as a `/`-separated archive name.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use webext_packager::collector::archive_path;
///
/// assert_eq!(archive_path(Utf8Path::new("./popup/index.html")), "popup/index.html");
/// ```
#[must_use]
pub fn archive_path(relative: &Utf8Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Utf8Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
