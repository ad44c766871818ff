//! End-to-end tests for the orchestrated build workflow.
//!
//! A scripted engine stands in for electron-builder so the tests can observe
//! the project while the "build" runs.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use kodegen_bundler_flavor::bundler::{
    ArtifactLocator, ArtifactRenamer, BuildOutcome, BuildRequest, EngineOutput, Error, Flavor,
    JsonReleaseNotes, Orchestrator, PackagingEngine, Platform, Result, SettingsBuilder,
};
use serde_json::Value;
use tempfile::TempDir;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// Copy the fixture project into a fresh temporary directory.
fn fixture_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in ["package.json", "RELEASENOTES.json"] {
        fs::copy(Path::new(FIXTURES).join(file), tmp.path().join(file)).unwrap();
    }
    fs::create_dir(tmp.path().join("icons")).unwrap();
    fs::write(tmp.path().join("icons/icon.png"), b"png").unwrap();
    tmp
}

fn notes_for(root: &Path) -> JsonReleaseNotes {
    JsonReleaseNotes::new(root.join("RELEASENOTES.json"), root.join("RELEASENOTES.md"))
}

/// Engine that records the manifest it saw and the request it received.
#[derive(Default)]
struct ScriptedEngine {
    fail: bool,
    panic: bool,
    seen_manifest: RefCell<Option<Value>>,
    seen_request: RefCell<Option<BuildRequest>>,
}

impl PackagingEngine for ScriptedEngine {
    async fn build(&self, request: &BuildRequest) -> Result<EngineOutput> {
        let manifest = fs::read_to_string(request.project_dir.join("package.json")).unwrap();
        *self.seen_manifest.borrow_mut() = Some(serde_json::from_str(&manifest).unwrap());
        *self.seen_request.borrow_mut() = Some(request.clone());

        if self.panic {
            panic!("engine crashed");
        }
        if self.fail {
            return Err(Error::EngineFailed {
                code: Some(1),
                stderr: "cannot find module".into(),
            });
        }
        Ok(EngineOutput {
            exit_code: Some(0),
            warnings: Vec::new(),
        })
    }
}

fn orchestrator(root: &Path, engine: ScriptedEngine) -> Orchestrator<ScriptedEngine, JsonReleaseNotes> {
    let settings = SettingsBuilder::new().project_root(root).build().unwrap();
    Orchestrator::new(settings, engine, notes_for(root))
}

#[tokio::test]
async fn flavors_are_visible_during_the_build_and_reverted_after() {
    let tmp = fixture_project();
    let original = fs::read(tmp.path().join("package.json")).unwrap();
    let orchestrator = orchestrator(tmp.path(), ScriptedEngine::default());

    let report = orchestrator
        .build(&["mac", "win32"], &[Flavor::Production, Flavor::Preview], |_| {})
        .await
        .unwrap();

    assert!(report.succeeded());
    assert!(report.platforms.contains(Platform::Macos));
    assert!(report.platforms.contains(Platform::Windows));

    let engine = orchestrator.engine().seen_manifest.borrow().clone().unwrap();
    assert_eq!(engine["build"]["appId"], "com.example.foobar.preview");
    assert_eq!(engine["appId"], "com.example.foobar.preview");
    assert_eq!(engine["productName"], "Foo Bar Preview");
    assert_eq!(engine["build"]["compression"], "store");
    assert_eq!(engine["build"]["mac"]["hardenedRuntime"], false);
    assert_eq!(engine["build"]["releaseInfo"]["releaseName"], "Foo Bar v1.0.0");
    assert!(
        engine["build"]["releaseInfo"]["releaseNotes"]
            .as_str()
            .unwrap()
            .contains("- Tray menu")
    );

    assert_eq!(fs::read(tmp.path().join("package.json")).unwrap(), original);
    assert!(!tmp.path().join("package-backup.json").exists());
    assert!(!tmp.path().join("icons-backup").exists());
    assert!(tmp.path().join("icons/icon.png").exists());
}

#[tokio::test]
async fn engine_receives_platform_and_arch_flags() {
    let tmp = fixture_project();
    let orchestrator = orchestrator(tmp.path(), ScriptedEngine::default());

    orchestrator
        .build(&["linux", "darwin"], &[], |_| {})
        .await
        .unwrap();

    let request = orchestrator.engine().seen_request.borrow().clone().unwrap();
    assert_eq!(
        request.engine_args(),
        ["--mac", "--linux", "--ia32", "--x64", "--arm64"]
    );
}

#[tokio::test]
async fn callback_runs_once_after_restore_on_success() {
    let tmp = fixture_project();
    let original = fs::read(tmp.path().join("package.json")).unwrap();
    let orchestrator = orchestrator(tmp.path(), ScriptedEngine::default());
    let calls = Cell::new(0);

    orchestrator
        .build(&["linux"], &[Flavor::Preview], |report| {
            calls.set(calls.get() + 1);
            assert!(report.succeeded());
            // The project is already back in its original state
            assert_eq!(fs::read(tmp.path().join("package.json")).unwrap(), original);
        })
        .await
        .unwrap();

    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn failed_engine_still_restores_and_calls_back() {
    let tmp = fixture_project();
    let original = fs::read(tmp.path().join("package.json")).unwrap();
    let engine = ScriptedEngine {
        fail: true,
        ..Default::default()
    };
    let orchestrator = orchestrator(tmp.path(), engine);
    let calls = Cell::new(0);

    let report = orchestrator
        .build(&["win"], &[Flavor::Preview], |report| {
            calls.set(calls.get() + 1);
            assert!(!report.succeeded());
        })
        .await
        .unwrap();

    assert_eq!(calls.get(), 1);
    match report.outcome {
        BuildOutcome::Failed(reason) => assert!(reason.contains("cannot find module")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(fs::read(tmp.path().join("package.json")).unwrap(), original);
}

#[tokio::test]
async fn empty_flavor_list_builds_the_manifest_unchanged() {
    let tmp = fixture_project();
    let original = fs::read_to_string(tmp.path().join("package.json")).unwrap();
    let orchestrator = orchestrator(tmp.path(), ScriptedEngine::default());

    orchestrator.build(&["linux"], &[], |_| {}).await.unwrap();

    let seen = orchestrator.engine().seen_manifest.borrow().clone().unwrap();
    let expected: Value = serde_json::from_str(&original).unwrap();
    assert_eq!(seen, expected);
    assert_eq!(
        fs::read_to_string(tmp.path().join("package.json")).unwrap(),
        original
    );
}

#[tokio::test]
async fn missing_manifest_fails_before_anything_runs() {
    let tmp = TempDir::new().unwrap();
    let orchestrator = orchestrator(tmp.path(), ScriptedEngine::default());
    let called = Cell::new(false);

    let result = orchestrator
        .build(&["linux"], &[Flavor::Preview], |_| called.set(true))
        .await;

    assert!(matches!(result, Err(Error::BackupFailed { .. })));
    assert!(!called.get());
    assert!(orchestrator.engine().seen_request.borrow().is_none());
    assert!(!tmp.path().join("package.json").exists());
}

#[tokio::test]
async fn flavor_failure_restores_and_skips_the_engine() {
    let tmp = fixture_project();
    let manifest = tmp.path().join("package.json");
    fs::write(&manifest, r#"{ "name": "foo-bar", "build": {} }"#).unwrap();
    let original = fs::read(&manifest).unwrap();
    let orchestrator = orchestrator(tmp.path(), ScriptedEngine::default());
    let called = Cell::new(false);

    let result = orchestrator
        .build(&["linux"], &[Flavor::Production], |_| called.set(true))
        .await;

    assert!(matches!(result, Err(Error::MissingField { field: "version" })));
    assert!(!called.get());
    assert!(orchestrator.engine().seen_request.borrow().is_none());
    assert_eq!(fs::read(&manifest).unwrap(), original);
    assert!(!tmp.path().join("package-backup.json").exists());
}

#[test]
fn panicking_engine_still_restores_the_project() {
    let tmp = fixture_project();
    let original = fs::read(tmp.path().join("package.json")).unwrap();
    let engine = ScriptedEngine {
        panic: true,
        ..Default::default()
    };
    let orchestrator = orchestrator(tmp.path(), engine);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        runtime.block_on(orchestrator.build(&["linux"], &[Flavor::Preview], |_| {}))
    }));

    assert!(result.is_err());
    assert_eq!(fs::read(tmp.path().join("package.json")).unwrap(), original);
    assert!(!tmp.path().join("package-backup.json").exists());
}

/// Locator returning a fixed list and counting lookups.
struct FixedLocator {
    files: Vec<PathBuf>,
    lookups: Cell<usize>,
}

impl ArtifactLocator for FixedLocator {
    fn find_installers(&self, _output_dir: &Path, version: &str) -> Result<Vec<PathBuf>> {
        assert_eq!(version, "1.0.0");
        self.lookups.set(self.lookups.get() + 1);
        Ok(self.files.clone())
    }
}

#[test]
fn renamer_renames_only_names_that_change() {
    let tmp = fixture_project();
    let dist = tmp.path().join("dist");
    fs::create_dir(&dist).unwrap();
    let files: Vec<PathBuf> = [
        "Foo Bar Setup 1.0.0.exe",
        "Foo Bar-1.0.0.dmg",
        "foo-bar-1.0.0.AppImage",
    ]
    .iter()
    .map(|name| {
        let path = dist.join(name);
        fs::write(&path, name).unwrap();
        path
    })
    .collect();

    let locator = FixedLocator {
        files,
        lookups: Cell::new(0),
    };
    let manifest = tmp.path().join("package.json");
    let calls = Cell::new(0);
    let report = ArtifactRenamer::new(&manifest, &locator)
        .rename(|_| calls.set(calls.get() + 1))
        .unwrap();

    assert_eq!(locator.lookups.get(), 1);
    assert_eq!(calls.get(), 1);
    assert_eq!(report.total, 3);
    assert_eq!(report.renamed_count(), 2);
    assert!(dist.join("foo-bar-setup-1.0.0.exe").exists());
    assert!(dist.join("foo-bar-1.0.0.dmg").exists());
    assert!(dist.join("foo-bar-1.0.0.AppImage").exists());
    assert!(!dist.join("Foo Bar Setup 1.0.0.exe").exists());
}

#[test]
fn renamer_reports_once_when_no_installers_exist() {
    let tmp = fixture_project();
    let locator = FixedLocator {
        files: Vec::new(),
        lookups: Cell::new(0),
    };
    let manifest = tmp.path().join("package.json");
    let calls = Cell::new(0);

    let report = ArtifactRenamer::new(&manifest, &locator)
        .rename(|report| {
            calls.set(calls.get() + 1);
            assert_eq!(report.total, 0);
        })
        .unwrap();

    assert_eq!(locator.lookups.get(), 1);
    assert_eq!(calls.get(), 1);
    assert_eq!(report.total, 0);
    assert_eq!(report.renamed_count(), 0);
}
