//! User-facing output lines.
//!
//! Diagnostics are written to an injected writer rather than straight to the
//! process streams, which keeps every message observable in tests.

use camino::Utf8Path;
use std::fmt;
use std::io::Write;

/// Write one line to the diagnostic stream, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Emit a non-fatal warning.
pub fn write_warning(stderr: &mut dyn Write, message: impl fmt::Display) {
    log::warn!("{message}");
    write_stderr_line(stderr, format_args!("warning: {message}"));
}

/// Confirmation printed once per produced archive.
#[must_use]
pub fn created_message(archive_path: &Utf8Path) -> String {
    format!("Created archive: {archive_path}")
}
