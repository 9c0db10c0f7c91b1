//! Archive naming policy.
//!
//! Constructs deterministic archive names in the format
//! `<base_name>-v<version>-<browser>.zip`.

use crate::browser::Browser;
use std::fmt;
use thiserror::Error;

/// The fixed file extension for extension archives.
const ARCHIVE_EXTENSION: &str = ".zip";

/// Errors arising from invalid archive name components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// A component is empty.
    #[error("archive {component} must not be empty")]
    Empty {
        /// Which component was rejected (`base name` or `version`).
        component: &'static str,
    },

    /// A component would place the archive outside the output directory.
    #[error("archive {component} \"{value}\" must not contain path separators")]
    PathSeparator {
        /// Which component was rejected.
        component: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// A fully-qualified archive file name.
///
/// # Examples
///
/// ```
/// use webext_packager::archive::naming::ArchiveName;
/// use webext_packager::browser::Browser;
///
/// let name = ArchiveName::new("ttagger", "1.4.0", Browser::Firefox).expect("valid name");
/// assert_eq!(name.to_string(), "ttagger-v1.4.0-firefox.zip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    base_name: String,
    version: String,
    browser: Browser,
}

impl ArchiveName {
    /// Create an archive name from its components.
    ///
    /// # Errors
    ///
    /// Returns [`NamingError`] if the base name or version is empty or
    /// contains `/` or `\`.
    pub fn new(base_name: &str, version: &str, browser: Browser) -> Result<Self, NamingError> {
        validate_component("base name", base_name)?;
        validate_component("version", version)?;
        Ok(Self {
            base_name: base_name.to_owned(),
            version: version.to_owned(),
            browser,
        })
    }

    /// Return the base name component.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Return the browser component.
    #[must_use]
    pub const fn browser(&self) -> Browser {
        self.browser
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

fn validate_component(component: &'static str, value: &str) -> Result<(), NamingError> {
    if value.is_empty() {
        return Err(NamingError::Empty { component });
    }
    if value.contains(['/', '\\']) {
        return Err(NamingError::PathSeparator {
            component,
            value: value.to_owned(),
        });
    }
    Ok(())
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-v{}-{}{ARCHIVE_EXTENSION}",
            self.base_name, self.version, self.browser
        )
    }
}
