//! Browser targets supported by the packager.
//!
//! Each target selects a set of manifest rewrites and contributes its
//! lowercase identifier to the archive file name.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A browser the extension can be packaged for.
///
/// # Examples
///
/// ```
/// use webext_packager::browser::Browser;
///
/// let browser: Browser = "firefox".parse().expect("known browser");
/// assert_eq!(browser, Browser::Firefox);
/// assert_eq!(browser.to_string(), "firefox");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Browser {
    /// Chromium-based browsers (Manifest V3 service worker).
    Chrome,
    /// Firefox (background scripts, Gecko-specific settings).
    Firefox,
}

impl Browser {
    /// Every supported browser, in packaging order.
    pub const ALL: [Self; 2] = [Self::Chrome, Self::Firefox];

    /// Return the lowercase identifier used in archive names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a supported browser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported browser \"{value}\"; expected one of: chrome, firefox")]
pub struct UnknownBrowser {
    /// The rejected identifier.
    pub value: String,
}

impl FromStr for Browser {
    type Err = UnknownBrowser;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|browser| browser.as_str() == value)
            .ok_or_else(|| UnknownBrowser {
                value: value.to_owned(),
            })
    }
}

impl TryFrom<&str> for Browser {
    type Error = UnknownBrowser;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
