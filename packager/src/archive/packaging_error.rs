//! Error types for archive packaging operations.
//!
//! Covers output directory creation, source file reads, ZIP encoding, and
//! manifest serialization failures that can occur while building one
//! browser archive.

use crate::collector::CollectError;
use crate::manifest::ManifestError;
use camino::Utf8PathBuf;
use thiserror::Error;

use super::naming::NamingError;

/// Errors arising from archive packaging operations.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// The archive name components are unusable.
    #[error("invalid archive name: {0}")]
    Naming(#[from] NamingError),

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be read into the archive.
    #[error("failed to read {path}: {source}")]
    ReadSource {
        /// The file being packaged.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The finished archive could not be moved into place.
    #[error("failed to write archive {path}: {source}")]
    Persist {
        /// Destination archive path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Walking the include paths failed.
    #[error(transparent)]
    Collect(#[from] CollectError),

    /// Serializing the browser manifest failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The ZIP encoder reported an error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Any other I/O failure while writing the archive.
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),
}
