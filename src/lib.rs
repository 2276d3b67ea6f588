#![forbid(unsafe_code)]
//! dashcheck: tooling for the attendance dashboard web app
//!
//! The app ships as one generated `app.js` with its `index.html` and `style.css`. This crate provides the
//! checks and patches that are run against those files:
//!
//! - `patch` - regex/literal source patches (Cairo-time helpers, shift-start handling, mobile CSS)
//! - `check` - cross-reference of `document.getElementById` ids against the HTML
//! - `smoke` - load `app.js` into an embedded JavaScript engine with stubbed browser globals and call
//!   `renderDashboard()`
//! - `cli` - the `dashcheck` command line
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: use `.expect("INVARIANT: reason")` (for example, compiling a constant regex).

pub mod check;
pub mod cli;
pub mod patch;
pub mod smoke;
pub mod version;

pub use check::{IdCheckReport, MissingDomId, check_dom_ids};
pub use patch::{BuiltinPatch, PatchReport, PatchSet};
pub use smoke::{SmokeConfig, SmokeHarness, SmokeOutcome, SmokeReport};
