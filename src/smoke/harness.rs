//! Harness runner
//!
//! One run walks a fixed sequence and stops at the first error:
//!
//! 1. evaluate the stub prelude (`document`, `window`, `localStorage`, `Chart`, `Intl`, `console`)
//! 2. evaluate the app source, after listener registrations were neutralized
//! 3. seed `state.employees` / `state.attendance`
//! 4. define the `t` / `escapeHTML` helpers
//! 5. call the entry point with no arguments
//!
//! Every error is caught here and becomes [`SmokeOutcome::Failed`]. Nothing is retried and nothing propagates to the
//! caller as an `Err`.

use std::fmt;
use std::sync::OnceLock;

use dashcheck_core::ListenerSanitizer;
use regex::Regex;
use serde::Deserialize;

use super::SmokeError;
use super::config::SmokeConfig;
use super::engine::{EngineError, ScriptEngine};
use super::prelude;
use super::reporter::SmokeReporter;

/// Where in the run a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeStage {
    Environment,
    Load,
    Seed,
    Helpers,
    Invoke,
}

impl fmt::Display for SmokeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SmokeStage::Environment => "environment",
            SmokeStage::Load => "load",
            SmokeStage::Seed => "seed",
            SmokeStage::Helpers => "helpers",
            SmokeStage::Invoke => "invoke",
        };
        f.write_str(name)
    }
}

/// The captured error of a failed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeFailure {
    pub stage: SmokeStage,
    pub message: String,
}

impl SmokeFailure {
    pub fn new(stage: SmokeStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    fn from_engine(stage: SmokeStage, err: EngineError) -> Self {
        Self::new(stage, err.message)
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeOutcome {
    Succeeded,
    Failed(SmokeFailure),
}

impl SmokeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SmokeOutcome::Succeeded)
    }

    pub fn failure(&self) -> Option<&SmokeFailure> {
        match self {
            SmokeOutcome::Succeeded => None,
            SmokeOutcome::Failed(failure) => Some(failure),
        }
    }
}

/// Counters kept by the stub environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProbe {
    /// `addEventListener` calls that reached the document/window stubs (aliased receivers).
    pub listener_registrations: u64,
    pub storage_reads: u64,
    pub storage_writes: u64,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub entry_point: String,
    pub outcome: SmokeOutcome,
    /// Registration call sites rewritten before evaluation.
    pub neutralized_listeners: usize,
    pub probe: EnvironmentProbe,
    /// Console output of the app, `level: message` per line.
    pub console: Vec<String>,
}

fn entry_point_regex() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
            .expect("INVARIANT: entry point pattern is a valid regex")
    })
}

/// Whether `name` is an identifier or a dotted identifier path.
pub fn is_valid_entry_point(name: &str) -> bool {
    entry_point_regex().is_match(name)
}

fn step<E: ScriptEngine>(engine: &mut E, stage: SmokeStage, label: &str, source: &str) -> Result<(), SmokeFailure> {
    tracing::debug!(%stage, label, "evaluating");
    engine
        .eval(label, source)
        .map_err(|err| SmokeFailure::from_engine(stage, err))
}

/// Runs an app script against the stub environment and calls one entry point.
pub struct SmokeHarness<E> {
    engine: E,
    config: SmokeConfig,
    sanitizer: ListenerSanitizer,
    seed: String,
}

impl<E: ScriptEngine> SmokeHarness<E> {
    /// Prepare a harness. The engine should be fresh: the prelude is evaluated into it on [`SmokeHarness::run`].
    ///
    /// ## Errors
    ///
    /// - [`SmokeError::InvalidEntryPoint`] if the entry point is not an identifier path
    /// - [`SmokeError::Sanitizer`] if the listener targets do not form a usable pattern
    /// - [`SmokeError::Fixture`] if the fixture state cannot be serialized
    pub fn new(engine: E, config: SmokeConfig) -> Result<Self, SmokeError> {
        if !is_valid_entry_point(&config.entry_point) {
            return Err(SmokeError::InvalidEntryPoint(config.entry_point));
        }
        let sanitizer = ListenerSanitizer::new(&config.listener_targets, prelude::NEUTRALIZED_LISTENER)?;
        let seed = config.state.seed_script()?;

        Ok(Self {
            engine,
            config,
            sanitizer,
            seed,
        })
    }

    /// Access the engine, e.g. to inspect globals after a run.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Run the app `source` and report the outcome. Never fails; errors are part of the report.
    pub fn run(&mut self, source: &str, reporter: &mut dyn SmokeReporter) -> SmokeReport {
        let sanitized = self.sanitizer.sanitize(source);
        if sanitized.neutralized > 0 {
            tracing::debug!(count = sanitized.neutralized, "neutralized listener registrations");
        }

        let outcome = match self.exercise(&sanitized.text, reporter) {
            Ok(()) => {
                reporter.on_success(&self.config.entry_point);
                SmokeOutcome::Succeeded
            }
            Err(failure) => {
                tracing::debug!(stage = %failure.stage, message = %failure.message, "smoke run failed");
                reporter.on_failure(&failure);
                SmokeOutcome::Failed(failure)
            }
        };

        let probe = self.read_probe();
        let console = self.drain_console();

        SmokeReport {
            entry_point: self.config.entry_point.clone(),
            outcome,
            neutralized_listeners: sanitized.neutralized,
            probe,
            console,
        }
    }

    fn exercise(&mut self, source: &str, reporter: &mut dyn SmokeReporter) -> Result<(), SmokeFailure> {
        step(&mut self.engine, SmokeStage::Environment, "prelude", prelude::PRELUDE)?;
        step(&mut self.engine, SmokeStage::Load, &self.config.source_label, source)?;
        reporter.on_loaded(&self.config.source_label);

        step(&mut self.engine, SmokeStage::Seed, "seed", &self.seed)?;
        step(&mut self.engine, SmokeStage::Helpers, "helpers", prelude::HELPERS)?;

        let entry = &self.config.entry_point;
        reporter.on_invoke(entry);

        let kind = self
            .engine
            .eval_to_string(entry, &format!("typeof {entry}"))
            .map_err(|err| SmokeFailure::from_engine(SmokeStage::Invoke, err))?;
        if kind != "function" {
            return Err(SmokeFailure::new(
                SmokeStage::Invoke,
                format!("TypeError: {entry} is not a function"),
            ));
        }

        step(&mut self.engine, SmokeStage::Invoke, entry, &format!("{entry}();"))
    }

    fn read_probe(&mut self) -> EnvironmentProbe {
        match self.engine.eval_to_string("probe", prelude::PROBE_JSON) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "unreadable environment probe");
                EnvironmentProbe::default()
            }),
            Err(err) => {
                tracing::warn!(error = %err, "environment probe unavailable");
                EnvironmentProbe::default()
            }
        }
    }

    fn drain_console(&mut self) -> Vec<String> {
        let text = match self.engine.eval_to_string("console", prelude::DRAIN_CONSOLE) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "app console output unavailable");
                return Vec::new();
            }
        };

        let lines: Vec<String> = text
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        for line in &lines {
            tracing::debug!(target: "dashcheck::app", "{line}");
        }
        lines
    }
}
