//! Packager configuration.
//!
//! The include lists, output location, and default archive name live in an
//! optional `packager.toml` at the project root. Every key has a default that
//! matches the stock extension layout, so a project without a configuration
//! file packages exactly the conventional directories.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// File name looked up in the project root when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "packager.toml";

const DEFAULT_MANIFEST: &str = "manifest.json";
const DEFAULT_OUTPUT_DIR: &str = "dist";
const DEFAULT_NAME: &str = "ttagger";

const DEFAULT_INCLUDE_PATHS: &[&str] = &[
    "_locales",
    "app",
    "assets",
    "background",
    "content",
    "options",
    "popup",
    "src",
    "styles",
];

const DEFAULT_DOC_PATHS: &[&str] = &["README.md", "PRIVACY.md", "DATA_SAFETY.md"];

const DEFAULT_SKIP_NAMES: &[&str] = &[".DS_Store", "__MACOSX"];

/// Errors arising while loading the packager configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: Utf8PathBuf,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("invalid configuration {path}: {source}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level packager settings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerConfig {
    /// Manifest location relative to the project root.
    pub manifest: Utf8PathBuf,
    /// Output directory relative to the project root.
    pub output_dir: Utf8PathBuf,
    /// Archive base name used when `--name` is not given.
    pub name: String,
    /// Which project files end up in the archive.
    pub sources: SourceSet,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            manifest: Utf8PathBuf::from(DEFAULT_MANIFEST),
            output_dir: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
            name: DEFAULT_NAME.to_owned(),
            sources: SourceSet::default(),
        }
    }
}

/// The project paths fed to the file collector.
///
/// Paths are relative to the project root and use `/` separators.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSet {
    /// Files or directories always packaged.
    pub include: Vec<String>,
    /// Documentation files packaged with `--include-docs`.
    pub docs: Vec<String>,
    /// File and directory names never packaged, at any depth.
    pub skip: Vec<String>,
}

impl Default for SourceSet {
    fn default() -> Self {
        Self {
            include: to_owned_list(DEFAULT_INCLUDE_PATHS),
            docs: to_owned_list(DEFAULT_DOC_PATHS),
            skip: to_owned_list(DEFAULT_SKIP_NAMES),
        }
    }
}

impl SourceSet {
    /// Whether `name` is in the skip-set.
    #[must_use]
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.iter().any(|skipped| skipped == name)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

impl PackagerConfig {
    /// Load the configuration for `project_root`.
    ///
    /// An `explicit` path must exist. Without one, `packager.toml` in the
    /// project root is read when present and defaults apply otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] for a missing explicit file, or a
    /// read/parse error for an unusable one.
    pub fn load(
        project_root: &Utf8Path,
        explicit: Option<&Utf8Path>,
    ) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.is_file() => Err(ConfigError::NotFound {
                path: path.to_owned(),
            }),
            Some(path) => Self::from_file(path),
            None => {
                let path = project_root.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    log::debug!("no {CONFIG_FILE_NAME} in {project_root}; using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("loaded configuration from {path}");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use webext_packager::config::PackagerConfig;
    ///
    /// let config = PackagerConfig::parse("name = \"tagger\"").expect("valid TOML");
    /// assert_eq!(config.name, "tagger");
    /// assert_eq!(config.output_dir, "dist");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
