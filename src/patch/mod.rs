//! Source patches for the dashboard app
//!
//! A [`PatchSet`] is an ordered list of [`RewriteRule`]s applied to one file. Rules that do not match are reported,
//! not treated as errors: the file is still written with whatever did apply.
//!
//! ## Built-in sets
//!
//! - `egypt-date-key` (`app.js`) - add `getCurrentEgyptDateKey()` and use it for "today" keys
//! - `shift-start` (`app.js`) - Cairo-time minutes and "shift not started yet" handling
//! - `mobile-stats` (`style.css`) - horizontal scrolling stats row on narrow screens

mod css;
mod dates;
mod shifts;

use dashcheck_core::{RewriteError, RewriteRule};
use thiserror::Error;

pub use css::mobile_stats;
pub use dates::egypt_date_key;
pub use shifts::shift_start;

/// Errors that abort a patch run.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patch `{patch}` failed: {source}")]
    Rewrite {
        patch: &'static str,
        #[source]
        source: RewriteError,
    },
}

/// The patch sets shipped with the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinPatch {
    EgyptDateKey,
    ShiftStart,
    MobileStats,
}

impl BuiltinPatch {
    pub fn patch_set(self) -> PatchSet {
        match self {
            BuiltinPatch::EgyptDateKey => egypt_date_key(),
            BuiltinPatch::ShiftStart => shift_start(),
            BuiltinPatch::MobileStats => mobile_stats(),
        }
    }

    /// File the patch is written for, relative to the app directory.
    pub fn default_target(self) -> &'static str {
        match self {
            BuiltinPatch::EgyptDateKey | BuiltinPatch::ShiftStart => "app.js",
            BuiltinPatch::MobileStats => "style.css",
        }
    }
}

/// A named, ordered list of rewrite rules.
#[derive(Debug, Clone)]
pub struct PatchSet {
    pub name: &'static str,
    pub rules: Vec<RewriteRule>,
}

/// How one rule fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub rule: String,
    pub replacements: usize,
}

impl RuleReport {
    pub fn applied(&self) -> bool {
        self.replacements > 0
    }
}

/// Outcome of applying a patch set to one file's text.
#[derive(Debug, Clone)]
pub struct PatchReport {
    pub patch: &'static str,
    pub original: String,
    pub text: String,
    pub rules: Vec<RuleReport>,
}

impl PatchReport {
    pub fn changed(&self) -> bool {
        self.original != self.text
    }

    /// Rules whose pattern was not found (or whose guard said the change is already there).
    pub fn skipped(&self) -> impl Iterator<Item = &RuleReport> {
        self.rules.iter().filter(|r| !r.applied())
    }

    pub fn diff(&self) -> Option<String> {
        line_diff(&self.original, &self.text)
    }
}

impl PatchSet {
    pub fn new(name: &'static str, rules: Vec<RewriteRule>) -> Self {
        Self { name, rules }
    }

    /// Apply every rule in order, each one seeing the output of the previous.
    pub fn apply(&self, source: &str) -> Result<PatchReport, PatchError> {
        let mut text = source.to_string();
        let mut rules = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let outcome = rule.apply(&text).map_err(|source| PatchError::Rewrite {
                patch: self.name,
                source,
            })?;
            tracing::debug!(
                patch = self.name,
                rule = %rule.name,
                replacements = outcome.replacements,
                "applied rewrite rule"
            );
            rules.push(RuleReport {
                rule: rule.name.clone(),
                replacements: outcome.replacements,
            });
            text = outcome.text;
        }

        Ok(PatchReport {
            patch: self.name,
            original: source.to_string(),
            text,
            rules,
        })
    }
}

/// Line-by-line diff between two texts, `None` when they are equal.
pub fn line_diff(before: &str, after: &str) -> Option<String> {
    if before == after {
        return None;
    }

    let mut diff = String::new();
    let before_lines: Vec<&str> = before.lines().collect();
    let after_lines: Vec<&str> = after.lines().collect();

    // Skip the common prefix and suffix so an insertion shows up as a block, not as every later line shifting.
    let prefix = before_lines
        .iter()
        .zip(&after_lines)
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = before_lines.len().min(after_lines.len()) - prefix;
    let suffix = before_lines
        .iter()
        .rev()
        .zip(after_lines.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    for (i, line) in before_lines[prefix..before_lines.len() - suffix].iter().enumerate() {
        diff.push_str(&format!("-{:4} | {}\n", prefix + i + 1, line));
    }
    for (i, line) in after_lines[prefix..after_lines.len() - suffix].iter().enumerate() {
        diff.push_str(&format!("+{:4} | {}\n", prefix + i + 1, line));
    }

    Some(diff)
}
