//! Provide the pure text scanners and rewrite rules used by the `dashcheck` commands.
//!
//! This crate is intentionally small and dependency-light. Everything here works on `&str` and returns owned results:
//! - `rewrite`: declarative rewrite rules (regex, literal, insert-after, prepend/append) with idempotence guards,
//! - `dom_ids`: extraction of `document.getElementById` references and HTML id lookup,
//! - `sanitize`: neutralization of listener registrations before a script is evaluated.
//!
//! ## Notes
//!
//! - **No IO** and no global state beyond lazily compiled regexes. Reading and writing files is the CLI's job.

pub mod dom_ids;
pub mod rewrite;
pub mod sanitize;

pub use dom_ids::{IdReference, declares_id, referenced_ids};
pub use rewrite::{RewriteError, RewriteKind, RewriteOutcome, RewriteRule};
pub use sanitize::{ListenerSanitizer, Sanitized};
