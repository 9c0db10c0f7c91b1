//! CLI argument definitions for the extension packager.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::browser::Browser;
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Package a browser extension into Chrome and Firefox ZIP archives.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "webext-package")]
#[command(about)]
#[command(long_about = concat!(
    "Package a browser extension into Chrome and Firefox ZIP archives.\n\n",
    "The manifest at the project root is rewritten for each browser and written ",
    "into the archive together with the configured include paths. Archives are ",
    "named <name>-v<version>-<browser>.zip and placed in the output directory.\n\n",
    "Include paths, documentation files, and the output directory can be ",
    "configured in packager.toml at the project root.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build both archives from the current directory:\n",
    "    $ webext-package\n\n",
    "  Build only the Firefox archive with documentation:\n",
    "    $ webext-package --target firefox --include-docs\n\n",
    "  Override the version and base name:\n",
    "    $ webext-package --name tagger --version 2.1.0-beta",
))]
pub struct Cli {
    /// Archive base name [default: from configuration, "ttagger"].
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Override the version read from the manifest.
    #[arg(long = "version", value_name = "VERSION")]
    pub version_override: Option<String>,

    /// Bundle README.md, PRIVACY.md and DATA_SAFETY.md.
    #[arg(long)]
    pub include_docs: bool,

    /// Which archive(s) to build.
    #[arg(long, value_enum, default_value_t = TargetSelection::All)]
    pub target: TargetSelection,

    /// Extension source tree containing the manifest.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_root: Utf8PathBuf,

    /// Configuration file [default: <project-root>/packager.toml if present].
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Output directory [default: from configuration, <project-root>/dist].
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,
}

/// Archive selection accepted by `--target`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSelection {
    /// Only the Chrome archive.
    Chrome,
    /// Only the Firefox archive.
    Firefox,
    /// Chrome, then Firefox.
    All,
}

impl TargetSelection {
    /// Expand the selection into browsers in packaging order.
    #[must_use]
    pub fn browsers(self) -> &'static [Browser] {
        match self {
            Self::Chrome => &[Browser::Chrome],
            Self::Firefox => &[Browser::Firefox],
            Self::All => &Browser::ALL,
        }
    }
}

#[cfg(test)]
impl Default for Cli {
    fn default() -> Self {
        Self {
            name: None,
            version_override: None,
            include_docs: false,
            target: TargetSelection::All,
            project_root: Utf8PathBuf::from("."),
            config: None,
            output_dir: None,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
