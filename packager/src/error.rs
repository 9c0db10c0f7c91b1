//! Error types for the packager CLI.
//!
//! [`PackagerError`] is the single error surfaced to users. Pre-flight
//! failures abort the run before any archive is attempted; packaging
//! failures name the browser whose archive could not be built.

use crate::archive::packaging_error::PackagingError;
use crate::browser::Browser;
use crate::config::ConfigError;
use crate::manifest::ManifestError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during a packaging run.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The manifest file does not exist.
    #[error("cannot find manifest at {path}")]
    ManifestNotFound {
        /// Where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// Neither `--version` nor the manifest supplies a version.
    #[error("unable to determine extension version; use --version to supply it manually")]
    VersionUndetermined,

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The manifest could not be loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Building one browser's archive failed.
    #[error("failed to package {browser} archive: {source}")]
    Packaging {
        /// The browser whose archive failed.
        browser: Browser,
        /// The underlying packaging failure.
        #[source]
        source: PackagingError,
    },

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::naming::NamingError;

    #[test]
    fn manifest_not_found_names_the_path() {
        let err = PackagerError::ManifestNotFound {
            path: Utf8PathBuf::from("/work/ext/manifest.json"),
        };
        assert_eq!(
            err.to_string(),
            "cannot find manifest at /work/ext/manifest.json"
        );
    }

    #[test]
    fn packaging_errors_name_the_browser() {
        let err = PackagerError::Packaging {
            browser: Browser::Firefox,
            source: PackagingError::Naming(NamingError::Empty {
                component: "version",
            }),
        };
        let message = err.to_string();
        assert!(message.starts_with("failed to package firefox archive"));
        assert!(message.contains("version must not be empty"));
    }
}
