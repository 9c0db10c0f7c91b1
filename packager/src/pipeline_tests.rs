//! Unit tests for packaging run orchestration.

use super::*;
use crate::archive::packaging::MANIFEST_ENTRY;
use crate::cli::TargetSelection;
use rstest::{fixture, rstest};
use std::fs;
use std::io::Read;
use tempfile::TempDir;

struct Project {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Project {
    fn write(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, contents).expect("write fixture file");
    }

    fn cli(&self) -> Cli {
        Cli {
            project_root: self.root.clone(),
            ..Cli::default()
        }
    }

    fn dist(&self) -> Utf8PathBuf {
        self.root.join("dist")
    }
}

#[fixture]
fn project() -> Project {
    let dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp dir");
    Project { _dir: dir, root }
}

fn run_captured(cli: &Cli) -> (Result<Vec<PackageOutput>>, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let result = run(cli, &mut stdout, &mut stderr);
    (
        result,
        String::from_utf8(stdout).expect("utf8 stdout"),
        String::from_utf8(stderr).expect("utf8 stderr"),
    )
}

fn archived_manifest(path: &Utf8PathBuf) -> serde_json::Value {
    let file = fs::File::open(path).expect("open archive");
    let mut archive = zip::ZipArchive::new(file).expect("valid zip");
    let mut entry = archive.by_name(MANIFEST_ENTRY).expect("manifest entry");
    let mut text = String::new();
    entry.read_to_string(&mut text).expect("read manifest");
    serde_json::from_str(&text).expect("manifest parses")
}

#[rstest]
fn missing_manifest_aborts_before_packaging(project: Project) {
    project.write("app/main.js", "main");

    let (result, stdout, _) = run_captured(&project.cli());

    let err = result.expect_err("missing manifest");
    assert!(matches!(err, PackagerError::ManifestNotFound { .. }));
    assert!(stdout.is_empty());
    assert!(!project.dist().exists());
}

#[rstest]
fn missing_version_aborts_before_packaging(project: Project) {
    project.write("manifest.json", r#"{ "name": "Tagger" }"#);

    let (result, stdout, _) = run_captured(&project.cli());

    assert!(matches!(
        result.expect_err("no version"),
        PackagerError::VersionUndetermined
    ));
    assert!(stdout.is_empty());
    assert!(!project.dist().exists());
}

#[rstest]
fn version_override_fills_in_missing_version(project: Project) {
    project.write("manifest.json", r#"{ "name": "Tagger" }"#);
    let cli = Cli {
        version_override: Some("5.0".to_owned()),
        target: TargetSelection::Chrome,
        ..project.cli()
    };

    let (result, stdout, _) = run_captured(&cli);

    let outputs = result.expect("packages");
    assert_eq!(outputs.len(), 1);
    assert_eq!(
        outputs[0].archive_path,
        project.dist().join("ttagger-v5.0-chrome.zip")
    );
    assert_eq!(
        stdout,
        format!("Created archive: {}\n", outputs[0].archive_path)
    );
}

#[rstest]
fn all_targets_build_chrome_then_firefox(project: Project) {
    project.write(
        "manifest.json",
        r#"{
            "version": "2.0",
            "background": { "scripts": ["a.js"], "service_worker": "b.js" },
            "oauth2": { "client_id": "x" }
        }"#,
    );
    let cli = Cli {
        name: Some("ext".to_owned()),
        ..project.cli()
    };

    let (result, stdout, stderr) = run_captured(&cli);

    let outputs = result.expect("packages");
    let names: Vec<String> = outputs
        .iter()
        .map(|output| output.archive_path.file_name().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(names, ["ext-v2.0-chrome.zip", "ext-v2.0-firefox.zip"]);
    assert_eq!(stdout.lines().count(), 2);
    // None of the stock include directories exist in this fixture.
    assert_eq!(stderr.lines().count(), 18);

    let chrome = archived_manifest(&outputs[0].archive_path);
    assert_eq!(chrome["background"], serde_json::json!({ "service_worker": "b.js" }));
    assert_eq!(chrome["oauth2"], serde_json::json!({ "client_id": "x" }));

    let firefox = archived_manifest(&outputs[1].archive_path);
    assert_eq!(firefox["background"], serde_json::json!({ "scripts": ["a.js"] }));
    assert!(firefox.get("oauth2").is_none());
}

#[rstest]
fn project_config_drives_sources_and_output(project: Project) {
    project.write("manifest.json", r#"{ "version": "1.0" }"#);
    project.write("js/app.js", "app");
    project.write(
        "packager.toml",
        "name = \"tagger\"\noutput_dir = \"out\"\n[sources]\ninclude = [\"js\"]\n",
    );
    let cli = Cli {
        target: TargetSelection::Firefox,
        ..project.cli()
    };

    let (result, _, stderr) = run_captured(&cli);

    let outputs = result.expect("packages");
    assert_eq!(
        outputs[0].archive_path,
        project.root.join("out/tagger-v1.0-firefox.zip")
    );
    assert_eq!(outputs[0].entry_count, 2);
    assert!(stderr.is_empty());
}

#[rstest]
fn cli_flags_override_configuration(project: Project) {
    project.write("manifest.json", r#"{ "version": "1.0" }"#);
    project.write("packager.toml", "name = \"tagger\"\n");
    let output_dir = project.root.join("elsewhere");
    let cli = Cli {
        name: Some("custom".to_owned()),
        output_dir: Some(output_dir.clone()),
        target: TargetSelection::Chrome,
        ..project.cli()
    };

    let plan = plan(&cli).expect("plan resolves");

    assert_eq!(plan.base_name, "custom");
    assert_eq!(plan.output_dir, output_dir);
    assert_eq!(plan.version, "1.0");
}

#[rstest]
fn invalid_configuration_is_fatal(project: Project) {
    project.write("manifest.json", r#"{ "version": "1.0" }"#);
    project.write("packager.toml", "unknown_key = true\n");

    let (result, _, _) = run_captured(&project.cli());

    assert!(matches!(
        result.expect_err("bad config"),
        PackagerError::Config(_)
    ));
}

#[rstest]
fn malformed_manifest_is_fatal(project: Project) {
    project.write("manifest.json", "{ not json");

    let (result, _, _) = run_captured(&project.cli());

    assert!(matches!(
        result.expect_err("bad manifest"),
        PackagerError::Manifest(_)
    ));
    assert!(!project.dist().exists());
}

#[rstest]
fn packaging_failure_names_the_browser(project: Project) {
    project.write("manifest.json", r#"{ "version": "1.0" }"#);
    let cli = Cli {
        name: Some("bad/name".to_owned()),
        target: TargetSelection::Firefox,
        ..project.cli()
    };

    let (result, stdout, _) = run_captured(&cli);

    let err = result.expect_err("invalid base name");
    assert!(matches!(
        err,
        PackagerError::Packaging {
            browser: crate::browser::Browser::Firefox,
            ..
        }
    ));
    assert!(stdout.is_empty());
}

#[rstest]
fn missing_configured_manifest_names_its_path(project: Project) {
    project.write("packager.toml", "manifest = \"ext/manifest.v3.json\"\n");

    let (result, _, _) = run_captured(&project.cli());

    let message = result.expect_err("missing manifest").to_string();
    assert!(message.starts_with("cannot find manifest at "), "{message}");
    assert!(message.ends_with("ext/manifest.v3.json"), "{message}");
}
