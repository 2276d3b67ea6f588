//! Smoke test for the dashboard script
//!
//! Loads `app.js` into an embedded JavaScript engine with stubbed browser globals and calls one rendering function.
//! The run passes if that function returns without throwing; nothing about its output is checked.
//!
//! ## Modules
//!
//! - `config` - entry point, listener targets, fixture state
//! - `engine` - [`ScriptEngine`] boundary and the `boa_engine` implementation
//! - `fixture` - the seeded `state` contents
//! - `harness` - the run itself
//! - `prelude` - JavaScript stubs evaluated before the app
//! - `reporter` - progress/success/failure lines

mod config;
mod engine;
mod fixture;
mod harness;
pub mod prelude;
mod reporter;

use thiserror::Error;

pub use config::SmokeConfig;
pub use engine::{BoaEngine, EngineError, ScriptEngine};
pub use fixture::{Employee, MockState};
pub use harness::{
    EnvironmentProbe, SmokeFailure, SmokeHarness, SmokeOutcome, SmokeReport, SmokeStage, is_valid_entry_point,
};
pub use reporter::{ConsoleReporter, RecordingReporter, SmokeReporter};

/// Errors that prevent a smoke run from starting. Once a run starts, failures are reported in the
/// [`SmokeOutcome`] instead.
#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("`{0}` is not a valid entry point (expected an identifier such as `renderDashboard`)")]
    InvalidEntryPoint(String),

    #[error("cannot build the listener sanitizer: {0}")]
    Sanitizer(#[from] regex::Error),

    #[error("cannot serialize fixture state: {0}")]
    Fixture(#[from] serde_json::Error),
}

/// Run `source` through a fresh [`BoaEngine`] with `config`, printing to the console.
pub fn run_smoke(source: &str, config: SmokeConfig) -> Result<SmokeReport, SmokeError> {
    let mut harness = SmokeHarness::new(BoaEngine::new(), config)?;
    Ok(harness.run(source, &mut ConsoleReporter))
}
