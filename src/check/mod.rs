//! DOM id cross-reference
//!
//! Every id the script looks up with `document.getElementById('<id>')` should exist in the HTML page.
//! Mismatches are warnings with a labeled span at the first lookup; they never fail the command.

use dashcheck_core::{declares_id, referenced_ids};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// An id looked up in code but not declared in the HTML.
#[derive(Debug, Error, Diagnostic)]
#[error("getElementById('{id}') found in {code_name} but not in {html_name}!")]
#[diagnostic(code(dashcheck::missing_dom_id), severity(Warning))]
pub struct MissingDomId {
    pub id: String,
    pub code_name: String,
    pub html_name: String,
    pub occurrences: usize,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("no element with this id")]
    pub span: SourceSpan,
    #[help]
    pub advice: Option<String>,
}

/// Result of one cross-reference pass.
#[derive(Debug, Default)]
pub struct IdCheckReport {
    /// Number of distinct ids found in the code.
    pub checked: usize,
    pub missing: Vec<MissingDomId>,
}

impl IdCheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_ids(&self) -> impl Iterator<Item = &str> {
        self.missing.iter().map(|m| m.id.as_str())
    }
}

/// Cross-reference the ids used in `code` against the ids declared in `html`.
///
/// `code_name` / `html_name` are only used for messages (usually the file names).
pub fn check_dom_ids(code_name: &str, code: &str, html_name: &str, html: &str) -> IdCheckReport {
    let refs = referenced_ids(code);
    let checked = refs.len();

    let missing = refs
        .into_iter()
        .filter(|r| !declares_id(html, &r.id))
        .map(|r| {
            tracing::debug!(id = %r.id, occurrences = r.occurrences, "dom id not declared in html");
            let advice = if r.occurrences > 1 {
                format!("looked up {} times; add id=\"{}\" to {html_name} or fix the lookups", r.occurrences, r.id)
            } else {
                format!("add id=\"{}\" to {html_name} or fix the lookup", r.id)
            };
            MissingDomId {
                src: NamedSource::new(code_name, code.to_string()),
                span: (r.offset, r.len).into(),
                advice: Some(advice),
                id: r.id,
                code_name: code_name.to_string(),
                html_name: html_name.to_string(),
                occurrences: r.occurrences,
            }
        })
        .collect();

    IdCheckReport { checked, missing }
}
