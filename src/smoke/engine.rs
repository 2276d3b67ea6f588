//! Script engine boundary
//!
//! The harness only needs two things from an engine: run a script in a persistent global scope, and evaluate an
//! expression to a string. [`BoaEngine`] is the real implementation; tests can substitute a scripted fake.

use boa_engine::{Context, JsError, Source};
use thiserror::Error;

/// A script raised (or failed to parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    /// Name of the script that failed (`prelude`, `app.js`, ...).
    pub label: String,
    /// Engine description of the thrown value, e.g. `TypeError: x is not a function`.
    pub message: String,
}

impl EngineError {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }
}

/// Evaluate scripts that share one global environment.
pub trait ScriptEngine {
    /// Run `source` as a classic script. Top-level declarations stay visible to later calls.
    fn eval(&mut self, label: &str, source: &str) -> Result<(), EngineError>;

    /// Evaluate `source` and convert its completion value with `String(value)` semantics.
    fn eval_to_string(&mut self, label: &str, source: &str) -> Result<String, EngineError>;
}

/// [`ScriptEngine`] backed by a single `boa_engine` context.
pub struct BoaEngine {
    context: Context,
}

impl BoaEngine {
    pub fn new() -> Self {
        Self {
            context: Context::default(),
        }
    }

    fn describe(&mut self, label: &str, err: JsError) -> EngineError {
        let message = match err.try_native(&mut self.context) {
            Ok(native) => native.to_string(),
            Err(_) => err.to_string(),
        };
        EngineError::new(label, message)
    }
}

impl Default for BoaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEngine for BoaEngine {
    fn eval(&mut self, label: &str, source: &str) -> Result<(), EngineError> {
        match self.context.eval(Source::from_bytes(source)) {
            Ok(_) => Ok(()),
            Err(err) => Err(self.describe(label, err)),
        }
    }

    fn eval_to_string(&mut self, label: &str, source: &str) -> Result<String, EngineError> {
        let value = match self.context.eval(Source::from_bytes(source)) {
            Ok(value) => value,
            Err(err) => return Err(self.describe(label, err)),
        };
        match value.to_string(&mut self.context) {
            Ok(text) => Ok(text.to_std_string_escaped()),
            Err(err) => Err(self.describe(label, err)),
        }
    }
}
