//! Packaging run orchestration.
//!
//! Resolves configuration, the manifest, and the version once, then builds
//! one archive per requested browser in order. Every pre-flight failure is
//! raised before the first archive is attempted.

use crate::archive::packaging::{PackageOutput, PackageParams, package_browser};
use crate::cli::Cli;
use crate::config::PackagerConfig;
use crate::error::{PackagerError, Result};
use crate::manifest::{Manifest, resolve_version};
use crate::output::created_message;
use camino::Utf8PathBuf;
use std::io::Write;

/// Everything resolved before packaging starts.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Loaded configuration.
    pub config: PackagerConfig,
    /// The generic manifest.
    pub manifest: Manifest,
    /// Version stamped into archive names.
    pub version: String,
    /// Archive base name.
    pub base_name: String,
    /// Directory archives are written to.
    pub output_dir: Utf8PathBuf,
}

/// Resolve configuration, manifest, version, and output location.
///
/// # Errors
///
/// Returns [`PackagerError::ManifestNotFound`] if the manifest is missing,
/// [`PackagerError::VersionUndetermined`] if no version is available, or a
/// configuration/manifest loading error.
pub fn plan(cli: &Cli) -> Result<RunPlan> {
    let root = &cli.project_root;
    let config = PackagerConfig::load(root, cli.config.as_deref())?;

    let manifest_path = root.join(&config.manifest);
    if !manifest_path.is_file() {
        return Err(PackagerError::ManifestNotFound {
            path: manifest_path,
        });
    }
    let manifest = Manifest::load(&manifest_path)?;

    let version = resolve_version(cli.version_override.as_deref(), &manifest)
        .ok_or(PackagerError::VersionUndetermined)?;
    let base_name = cli.name.clone().unwrap_or_else(|| config.name.clone());
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| root.join(&config.output_dir));

    log::debug!("packaging {base_name} v{version} into {output_dir}");
    Ok(RunPlan {
        config,
        manifest,
        version,
        base_name,
        output_dir,
    })
}

/// Build every archive requested on the command line.
///
/// Prints one confirmation line per archive to `stdout`; warnings go to
/// `stderr`. Stops at the first browser whose archive fails.
///
/// # Errors
///
/// Returns any pre-flight error from [`plan`], a
/// [`PackagerError::Packaging`] naming the failing browser, or
/// [`PackagerError::WriteFailed`] if the confirmation cannot be printed.
pub fn run(
    cli: &Cli,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<Vec<PackageOutput>> {
    let plan = plan(cli)?;
    let mut outputs = Vec::new();

    for &browser in cli.target.browsers() {
        let params = PackageParams {
            manifest: &plan.manifest,
            browser,
            version: &plan.version,
            base_name: &plan.base_name,
            include_docs: cli.include_docs,
            project_root: &cli.project_root,
            output_dir: &plan.output_dir,
            sources: &plan.config.sources,
        };
        let output = package_browser(&params, stderr)
            .map_err(|source| PackagerError::Packaging { browser, source })?;

        writeln!(stdout, "{}", created_message(&output.archive_path))
            .map_err(|source| PackagerError::WriteFailed { source })?;
        outputs.push(output);
    }

    Ok(outputs)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
