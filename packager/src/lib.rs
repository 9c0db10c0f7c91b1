//! Browser-extension packager library.
//!
//! This crate packages an extension source tree into one ZIP archive per
//! browser, rewriting the shared manifest for each target. It is used by the
//! `webext-package` CLI binary and can be consumed programmatically for
//! testing or custom release workflows.
//!
//! # Modules
//!
//! - [`archive`] - Archive naming and ZIP packaging
//! - [`browser`] - Supported browser targets
//! - [`cli`] - Command-line argument definitions
//! - [`collector`] - Lazy enumeration of packaged project files
//! - [`config`] - `packager.toml` configuration
//! - [`error`] - Semantic error types for a packaging run
//! - [`manifest`] - Manifest loading and per-browser rewriting
//! - [`output`] - User-facing diagnostic lines
//! - [`pipeline`] - Packaging run orchestration

pub mod archive;
pub mod browser;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pipeline;
