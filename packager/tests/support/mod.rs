//! Test support utilities for packager behavioural tests.
//!
//! This module provides a throwaway extension project rooted in a temporary
//! directory, plus helpers for reading back the archives the packager
//! produces.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Read;
use tempfile::TempDir;

/// An extension source tree living in a temporary directory.
pub struct ExtensionProject {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ExtensionProject {
    /// Create an empty project.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp dir");
        Self { _dir: dir, root }
    }

    /// The project root.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The default output directory.
    pub fn dist(&self) -> Utf8PathBuf {
        self.root.join("dist")
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, contents).expect("write fixture file");
    }

    /// Write `manifest.json` from a JSON value.
    pub fn write_manifest(&self, manifest: &serde_json::Value) {
        let text = serde_json::to_string_pretty(manifest).expect("serialize manifest");
        self.write("manifest.json", text);
    }

    /// Names of the archives currently in the output directory.
    pub fn archives(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.dist()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.expect("dist entry").file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".zip"))
            .collect();
        names.sort();
        names
    }
}

/// Read every `(name, contents)` pair from a ZIP archive, in archive order.
pub fn read_archive(path: &Utf8Path) -> Vec<(String, Vec<u8>)> {
    let file = fs::File::open(path).expect("open archive");
    let mut archive = zip::ZipArchive::new(file).expect("valid zip");
    (0..archive.len())
        .map(|index| {
            let mut entry = archive.by_index(index).expect("entry");
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).expect("read entry");
            (entry.name().to_owned(), contents)
        })
        .collect()
}

/// Parse the `manifest.json` entry of a ZIP archive.
pub fn read_archived_manifest(path: &Utf8Path) -> serde_json::Value {
    let (_, contents) = read_archive(path)
        .into_iter()
        .find(|(name, _)| name == "manifest.json")
        .expect("archive has manifest.json");
    serde_json::from_slice(&contents).expect("manifest parses")
}
