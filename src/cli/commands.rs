//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use crate::check::check_dom_ids;
use crate::patch::BuiltinPatch;
use crate::smoke::{SmokeConfig, SmokeOutcome, run_smoke};

use super::{CliError, CliResult, ExitCode, PatchFlags};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected before they are read into memory.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    tracing::debug!(path = %path.display(), bytes = metadata.len(), "reading source");
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

fn write_source(path: &Path, text: &str) -> CliResult<()> {
    tracing::debug!(path = %path.display(), bytes = text.len(), "writing source");
    fs::write(path, text).map_err(|e| CliError::failure(format!("Error writing file '{}': {}", path.display(), e)))
}

/// Apply a built-in patch set to `path`.
///
/// Rules that do not match are reported on stderr and the rest of the patch still applies. With `--check` nothing
/// is written and the exit code is 1 when the file would change.
pub fn patch_file(patch: BuiltinPatch, path: &Path, flags: PatchFlags) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let set = patch.patch_set();
    let report = set
        .apply(&source)
        .map_err(|e| CliError::failure(format!("Error patching '{}': {}", path.display(), e)))?;

    for skipped in report.skipped() {
        eprintln!(
            "Could not apply `{}` to {} (pattern not found or already applied)",
            skipped.rule,
            path.display()
        );
    }

    if flags.diff {
        if let Some(diff) = report.diff() {
            println!("--- {}", path.display());
            print!("{}", diff);
        }
    }

    if flags.check {
        if report.changed() {
            eprintln!("{} would be patched by `{}`", path.display(), report.patch);
            return Ok(ExitCode::FAILURE);
        }
        println!("{} is up to date", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    if report.changed() {
        write_source(path, &report.text)?;
        let applied = report.rules.iter().filter(|r| r.applied()).count();
        tracing::info!(patch = report.patch, applied, total = report.rules.len(), "patch applied");
        println!("{} patched successfully.", path.display());
    } else {
        println!("{} already up to date.", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

/// Cross-reference DOM ids. Mismatches are printed as warnings; the exit code is always success.
pub fn check_ids(app: &Path, html: &Path) -> CliResult<ExitCode> {
    let code = read_source(app)?;
    let page = read_source(html)?;

    let app_name = app.display().to_string();
    let html_name = html.display().to_string();
    let report = check_dom_ids(&app_name, &code, &html_name, &page);
    tracing::debug!(checked = report.checked, missing = report.missing.len(), "dom id check finished");

    if report.is_clean() {
        println!("No obvious DOM ID mismatches found.");
    } else {
        for missing in report.missing {
            eprintln!("{:?}", miette::Report::new(missing));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Smoke-test the app script. A failing entry point is reported, not turned into a non-zero exit.
pub fn smoke(path: &Path, entry: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;

    let config = SmokeConfig::default()
        .with_entry_point(entry)
        .with_source_label(path.display().to_string());
    let report = run_smoke(&source, config).map_err(|e| CliError::failure(e.to_string()))?;
    match &report.outcome {
        SmokeOutcome::Succeeded => tracing::info!(
            entry = %report.entry_point,
            neutralized = report.neutralized_listeners,
            "smoke run succeeded"
        ),
        SmokeOutcome::Failed(failure) => tracing::info!(
            entry = %report.entry_point,
            stage = %failure.stage,
            "smoke run failed"
        ),
    }
    if report.probe.listener_registrations > 0 {
        tracing::warn!(
            count = report.probe.listener_registrations,
            "listener registrations reached the stubs without being neutralized"
        );
    }

    Ok(ExitCode::SUCCESS)
}
