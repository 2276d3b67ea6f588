//! CLI command tests against files in a temporary directory

use std::fs;
use std::path::PathBuf;

use dashcheck::BuiltinPatch;
use dashcheck::cli::commands::{check_ids, patch_file, read_source, smoke};
use dashcheck::cli::{ExitCode, PatchFlags};
use tempfile::TempDir;

const SHIFT_APP: &str = include_str!("fixtures/shift_app.js");

const WRITE: PatchFlags = PatchFlags {
    check: false,
    diff: false,
};
const CHECK: PatchFlags = PatchFlags {
    check: true,
    diff: false,
};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_patch_css_writes_then_is_up_to_date() {
    let dir = TempDir::new().unwrap();
    let css = write(&dir, "style.css", "body { margin: 0; }\n");

    assert_eq!(patch_file(BuiltinPatch::MobileStats, &css, CHECK).unwrap(), ExitCode::FAILURE);
    assert_eq!(fs::read_to_string(&css).unwrap(), "body { margin: 0; }\n");

    assert_eq!(patch_file(BuiltinPatch::MobileStats, &css, WRITE).unwrap(), ExitCode::SUCCESS);
    let patched = fs::read_to_string(&css).unwrap();
    assert!(patched.starts_with("body { margin: 0; }\n"));
    assert!(patched.contains("@media (max-width: 768px)"));

    assert_eq!(patch_file(BuiltinPatch::MobileStats, &css, CHECK).unwrap(), ExitCode::SUCCESS);
    assert_eq!(patch_file(BuiltinPatch::MobileStats, &css, WRITE).unwrap(), ExitCode::SUCCESS);
    assert_eq!(fs::read_to_string(&css).unwrap(), patched);
}

#[test]
fn test_patch_shifts_on_fixture() {
    let dir = TempDir::new().unwrap();
    let app = write(&dir, "app.js", SHIFT_APP);

    let flags = PatchFlags {
        check: false,
        diff: true,
    };
    assert_eq!(patch_file(BuiltinPatch::ShiftStart, &app, flags).unwrap(), ExitCode::SUCCESS);
    let patched = fs::read_to_string(&app).unwrap();
    assert!(patched.contains("function getEgyptTimeMinutes"));
    assert!(patched.contains("if (!isStarted"));

    assert_eq!(patch_file(BuiltinPatch::ShiftStart, &app, CHECK).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn test_patch_without_matches_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let app = write(&dir, "app.js", "console.log('unrelated');\n");

    assert_eq!(patch_file(BuiltinPatch::EgyptDateKey, &app, WRITE).unwrap(), ExitCode::SUCCESS);
    assert_eq!(fs::read_to_string(&app).unwrap(), "console.log('unrelated');\n");
}

#[test]
fn test_patch_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = patch_file(BuiltinPatch::MobileStats, &dir.path().join("nope.css"), WRITE).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
    assert!(err.message.contains("Cannot access file"));
}

#[test]
fn test_read_source_reads_text() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "a.js", "var x = 1;");
    assert_eq!(read_source(&path).unwrap(), "var x = 1;");
}

#[test]
fn test_check_ids_always_succeeds() {
    let dir = TempDir::new().unwrap();
    let app = write(
        &dir,
        "app.js",
        "document.getElementById('clock'); document.getElementById(\"ghost\");",
    );
    let clean = write(&dir, "clean.html", "<div id=\"clock\"></div><div id='ghost'></div>");
    let partial = write(&dir, "partial.html", "<div id=\"clock\"></div>");

    assert_eq!(check_ids(&app, &clean).unwrap(), ExitCode::SUCCESS);
    assert_eq!(check_ids(&app, &partial).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn test_check_ids_missing_html_is_an_error() {
    let dir = TempDir::new().unwrap();
    let app = write(&dir, "app.js", "");
    assert!(check_ids(&app, &dir.path().join("index.html")).is_err());
}

#[test]
fn test_smoke_exit_code_ignores_outcome() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.js", "var state = {}; function renderDashboard() {}");
    let bad = write(&dir, "bad.js", "var state = {}; function renderDashboard() { throw new Error('x'); }");

    assert_eq!(smoke(&good, "renderDashboard").unwrap(), ExitCode::SUCCESS);
    assert_eq!(smoke(&bad, "renderDashboard").unwrap(), ExitCode::SUCCESS);
}

#[test]
fn test_smoke_rejects_invalid_entry_point() {
    let dir = TempDir::new().unwrap();
    let app = write(&dir, "app.js", "var state = {};");
    let err = smoke(&app, "renderDashboard(); evil").unwrap_err();
    assert!(err.message.contains("not a valid entry point"));
}
