//! Scripts the harness evaluates around the app source.
//!
//! The stubs are plain JavaScript so they work with any [`ScriptEngine`](super::ScriptEngine) implementation.

/// Browser stand-ins: `window`, `document`, `localStorage`, `Chart`, `Intl.DateTimeFormat`, `console`, plus the
/// `__dashcheck` probe object.
///
/// Engines should evaluate this once per context before running the app script.
pub const PRELUDE: &str = include_str!("prelude.js");

/// Helpers the app expects to find globally once it is loaded: identity translation and non-escaping `escapeHTML`.
pub const HELPERS: &str = "globalThis.t = function (key) { return key; };\n\
globalThis.escapeHTML = function (s) { return String(s); };\n";

/// Callee substituted for `document.addEventListener` / `window.addEventListener`. Resolves to a no-op that ignores
/// its arguments, so the handler is never registered or run.
///
/// Registrations inside comments and strings are substituted as well, so this stays a bare identifier path.
pub const NEUTRALIZED_LISTENER: &str = "__dashcheck.ignoreListener";

/// Expression yielding the probe counters as JSON.
pub const PROBE_JSON: &str = "JSON.stringify(__dashcheck.probe)";

/// Expression yielding (and clearing) the captured console output, one line per call.
pub const DRAIN_CONSOLE: &str = "__dashcheck.drainConsole()";
