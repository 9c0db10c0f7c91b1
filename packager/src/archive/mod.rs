//! Archive naming and packaging.
//!
//! # Sub-modules
//!
//! - [`naming`] - Archive file naming policy (`ArchiveName`).
//! - [`packaging`] - ZIP creation for one browser target.
//! - [`packaging_error`] - Error types for packaging operations.

pub mod naming;
pub mod packaging;
pub mod packaging_error;
