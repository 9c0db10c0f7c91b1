//! Extension manifest loading and per-browser rewriting.
//!
//! The manifest is kept as an ordered JSON object so that fields the packager
//! does not understand pass through untouched and in their original order.
//! Browser-specific copies are produced by [`Manifest::for_browser`], which
//! never modifies the manifest it is called on.

use crate::browser::Browser;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors arising while reading or serializing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Read {
        /// Path of the manifest file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON.
    #[error("invalid JSON in manifest {path}: {source}")]
    Parse {
        /// Path of the manifest file.
        path: Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed, but its top level is not a JSON object.
    #[error("manifest {path} must contain a JSON object at the top level")]
    NotAnObject {
        /// Path of the manifest file.
        path: Utf8PathBuf,
    },

    /// Serializing a browser-specific manifest failed.
    #[error("manifest serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A parsed extension manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Load a manifest from a UTF-8 JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Read`] if the file cannot be read,
    /// [`ManifestError::Parse`] if it is not JSON, or
    /// [`ManifestError::NotAnObject`] if the document is not an object.
    pub fn load(path: &Utf8Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_owned(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|source| ManifestError::Parse {
                path: path.to_owned(),
                source,
            })?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ManifestError::NotAnObject {
                path: path.to_owned(),
            }),
        }
    }

    /// Borrow the top-level fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Return the manifest's own version, if it declares a usable one.
    ///
    /// String versions are returned verbatim and numeric versions are
    /// rendered in their JSON form. Empty strings and other value types
    /// count as absent.
    #[must_use]
    pub fn version(&self) -> Option<String> {
        match self.fields.get("version")? {
            Value::String(version) if !version.is_empty() => Some(version.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    /// Produce the manifest variant shipped to `browser`.
    ///
    /// The receiver is cloned structurally before any field is touched, so
    /// the original manifest is unchanged after the call.
    ///
    /// - Chrome drops `background.scripts` and `browser_specific_settings`.
    /// - Firefox drops `background.service_worker` and `oauth2`, and
    ///   flattens an object-valued `author` to its `name` (or `""`).
    ///
    /// Absent fields are ignored. Remaining keys keep their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use webext_packager::browser::Browser;
    /// use webext_packager::manifest::Manifest;
    ///
    /// let manifest: Manifest = serde_json::json!({
    ///     "version": "1.0",
    ///     "oauth2": { "client_id": "x" },
    /// })
    /// .try_into()
    /// .expect("object manifest");
    ///
    /// let firefox = manifest.for_browser(Browser::Firefox);
    /// assert!(!firefox.fields().contains_key("oauth2"));
    /// assert!(manifest.fields().contains_key("oauth2"));
    /// ```
    #[must_use]
    pub fn for_browser(&self, browser: Browser) -> Self {
        let mut fields = self.fields.clone();
        match browser {
            Browser::Chrome => {
                remove_background_field(&mut fields, "scripts");
                fields.shift_remove("browser_specific_settings");
            }
            Browser::Firefox => {
                remove_background_field(&mut fields, "service_worker");
                fields.shift_remove("oauth2");
                flatten_author(&mut fields);
            }
        }
        Self { fields }
    }

    /// Serialize the manifest as it is written into an archive.
    ///
    /// The output is two-space indented JSON terminated by a newline.
    /// Non-ASCII characters are emitted as-is rather than escaped.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Serialization`] if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, ManifestError> {
        let mut json = serde_json::to_string_pretty(&self.fields)?;
        json.push('\n');
        Ok(json)
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for Manifest {
    type Error = Value;

    /// Accept a JSON object, handing any other value back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(other),
        }
    }
}

/// Remove `key` from the `background` object when both exist.
fn remove_background_field(fields: &mut Map<String, Value>, key: &str) {
    if let Some(Value::Object(background)) = fields.get_mut("background") {
        background.shift_remove(key);
    }
}

/// Replace an object-valued `author` with its `name` member.
fn flatten_author(fields: &mut Map<String, Value>) {
    let name = match fields.get("author") {
        Some(Value::Object(author)) => author
            .get("name")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())),
        _ => return,
    };
    fields.insert("author".to_owned(), name);
}

/// Pick the version to stamp into archive names.
///
/// A non-empty override wins; otherwise the manifest's own version is used.
/// Returns `None` when neither source yields a version.
#[must_use]
pub fn resolve_version(override_version: Option<&str>, manifest: &Manifest) -> Option<String> {
    override_version
        .filter(|version| !version.is_empty())
        .map(str::to_owned)
        .or_else(|| manifest.version())
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
