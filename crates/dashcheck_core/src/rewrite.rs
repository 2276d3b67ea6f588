//! Declarative text rewrite rules.
//!
//! A [`RewriteRule`] is a named transformation over a whole file. Applying a rule never fails because a pattern is
//! absent: the outcome simply reports zero replacements and the caller decides whether that deserves a warning.
//! The only error is a pattern that does not compile.

use regex::{NoExpand, Regex};
use thiserror::Error;

/// Errors produced while applying a rewrite rule.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("rule `{rule}` has an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}

/// What a rule does to the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteKind {
    /// Replace every regex match. With `expand`, `${1}`-style capture references in `replacement` are expanded;
    /// otherwise the replacement is inserted verbatim (so `$` needs no escaping).
    Regex {
        pattern: String,
        replacement: String,
        expand: bool,
    },
    /// Replace every literal occurrence of `find`.
    Literal { find: String, replace: String },
    /// Insert `text` directly after the first match of `pattern`.
    InsertAfter { pattern: String, text: String },
    /// Put `text` in front of the file.
    Prepend { text: String },
    /// Put `text` at the end of the file.
    Append { text: String },
}

/// A named rewrite step.
///
/// `unless` is an idempotence guard: when the marker already occurs in the input the rule is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub name: String,
    pub kind: RewriteKind,
    pub unless: Option<String>,
}

/// Result of applying one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    /// Number of places the rule touched (0 means the rule did not apply).
    pub replacements: usize,
}

impl RewriteOutcome {
    fn unchanged(source: &str) -> Self {
        Self {
            text: source.to_string(),
            replacements: 0,
        }
    }

    pub fn applied(&self) -> bool {
        self.replacements > 0
    }
}

impl RewriteRule {
    pub fn new(name: impl Into<String>, kind: RewriteKind) -> Self {
        Self {
            name: name.into(),
            kind,
            unless: None,
        }
    }

    /// Skip the rule when `marker` already occurs in the input.
    pub fn unless(mut self, marker: impl Into<String>) -> Self {
        self.unless = Some(marker.into());
        self
    }

    pub fn regex(name: impl Into<String>, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::new(
            name,
            RewriteKind::Regex {
                pattern: pattern.into(),
                replacement: replacement.into(),
                expand: false,
            },
        )
    }

    /// Like [`RewriteRule::regex`], but `${n}` in the replacement refers to capture group `n`.
    pub fn regex_expanding(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            RewriteKind::Regex {
                pattern: pattern.into(),
                replacement: replacement.into(),
                expand: true,
            },
        )
    }

    pub fn literal(name: impl Into<String>, find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self::new(
            name,
            RewriteKind::Literal {
                find: find.into(),
                replace: replace.into(),
            },
        )
    }

    pub fn insert_after(name: impl Into<String>, pattern: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            name,
            RewriteKind::InsertAfter {
                pattern: pattern.into(),
                text: text.into(),
            },
        )
    }

    pub fn prepend(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, RewriteKind::Prepend { text: text.into() })
    }

    pub fn append(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, RewriteKind::Append { text: text.into() })
    }

    fn compile(&self, pattern: &str) -> Result<Regex, RewriteError> {
        Regex::new(pattern).map_err(|source| RewriteError::InvalidPattern {
            rule: self.name.clone(),
            source,
        })
    }

    /// Apply the rule to `source`.
    ///
    /// ## Errors
    ///
    /// Returns [`RewriteError::InvalidPattern`] if a regex-based rule has a pattern that does not compile.
    pub fn apply(&self, source: &str) -> Result<RewriteOutcome, RewriteError> {
        if let Some(marker) = &self.unless {
            if source.contains(marker.as_str()) {
                return Ok(RewriteOutcome::unchanged(source));
            }
        }

        match &self.kind {
            RewriteKind::Regex {
                pattern,
                replacement,
                expand,
            } => {
                let re = self.compile(pattern)?;
                let replacements = re.find_iter(source).count();
                if replacements == 0 {
                    return Ok(RewriteOutcome::unchanged(source));
                }
                let text = if *expand {
                    re.replace_all(source, replacement.as_str())
                } else {
                    re.replace_all(source, NoExpand(replacement.as_str()))
                };
                Ok(RewriteOutcome {
                    text: text.into_owned(),
                    replacements,
                })
            }
            RewriteKind::Literal { find, replace } => {
                // An empty needle would match between every character.
                if find.is_empty() {
                    return Ok(RewriteOutcome::unchanged(source));
                }
                let replacements = source.matches(find.as_str()).count();
                if replacements == 0 {
                    return Ok(RewriteOutcome::unchanged(source));
                }
                Ok(RewriteOutcome {
                    text: source.replace(find.as_str(), replace),
                    replacements,
                })
            }
            RewriteKind::InsertAfter { pattern, text } => {
                let re = self.compile(pattern)?;
                let Some(found) = re.find(source) else {
                    return Ok(RewriteOutcome::unchanged(source));
                };
                let mut out = String::with_capacity(source.len() + text.len());
                out.push_str(&source[..found.end()]);
                out.push_str(text);
                out.push_str(&source[found.end()..]);
                Ok(RewriteOutcome {
                    text: out,
                    replacements: 1,
                })
            }
            RewriteKind::Prepend { text } => Ok(RewriteOutcome {
                text: format!("{text}{source}"),
                replacements: 1,
            }),
            RewriteKind::Append { text } => Ok(RewriteOutcome {
                text: format!("{source}{text}"),
                replacements: 1,
            }),
        }
    }
}
