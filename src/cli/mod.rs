//! CLI module for dashcheck
//!
//! ## Commands
//!
//! - `patch-dates [APP_JS]` - add `getCurrentEgyptDateKey()` and use it for today's date key
//! - `patch-shifts [APP_JS]` - Cairo-time minutes and shift-start handling
//! - `patch-css [STYLE_CSS]` - mobile stats row
//! - `check-ids` - cross-reference `getElementById` ids against `index.html`
//! - `smoke [APP_JS]` - load the app with stubbed browser globals and call `renderDashboard()`
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::patch::BuiltinPatch;
use crate::version::DASHCHECK_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Patch, lint and smoke-test the attendance dashboard app
#[derive(Parser, Debug)]
#[command(name = "dashcheck")]
#[command(version = DASHCHECK_VERSION)]
#[command(about = "Patch, lint and smoke-test the attendance dashboard app", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by the patch commands.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct PatchFlags {
    /// Report whether the file would change without writing it
    #[arg(long)]
    pub check: bool,
    /// Show a line diff of the change
    #[arg(long)]
    pub diff: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add getCurrentEgyptDateKey() and use it for today's date key
    PatchDates {
        /// App script to patch
        #[arg(value_name = "APP_JS", default_value = "app.js")]
        path: PathBuf,
        #[command(flatten)]
        flags: PatchFlags,
    },

    /// Evaluate shifts in Cairo time and skip employees whose shift has not started
    PatchShifts {
        /// App script to patch
        #[arg(value_name = "APP_JS", default_value = "app.js")]
        path: PathBuf,
        #[command(flatten)]
        flags: PatchFlags,
    },

    /// Append the mobile stats-row media query
    PatchCss {
        /// Stylesheet to patch
        #[arg(value_name = "STYLE_CSS", default_value = "style.css")]
        path: PathBuf,
        #[command(flatten)]
        flags: PatchFlags,
    },

    /// Warn about getElementById ids that index.html does not declare
    CheckIds {
        /// App script to scan
        #[arg(long, value_name = "APP_JS", default_value = "app.js")]
        app: PathBuf,
        /// HTML page to look ids up in
        #[arg(long, value_name = "INDEX_HTML", default_value = "index.html")]
        html: PathBuf,
    },

    /// Load the app with stubbed browser globals and call the render function
    Smoke {
        /// App script to load
        #[arg(value_name = "APP_JS", default_value = "app.js")]
        path: PathBuf,
        /// Function to call once the app is loaded
        #[arg(long = "entry", value_name = "NAME", default_value = "renderDashboard")]
        entry: String,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::PatchDates { path, flags } => commands::patch_file(BuiltinPatch::EgyptDateKey, &path, flags),
        Command::PatchShifts { path, flags } => commands::patch_file(BuiltinPatch::ShiftStart, &path, flags),
        Command::PatchCss { path, flags } => commands::patch_file(BuiltinPatch::MobileStats, &path, flags),
        Command::CheckIds { app, html } => commands::check_ids(&app, &html),
        Command::Smoke { path, entry } => commands::smoke(&path, &entry),
    }
}

// ============================================================================
// Tests
// ============================================================================
