//! Neutralize listener registrations before a script is evaluated outside a browser.
//!
//! `document.addEventListener(...)` and friends are rewritten so the callee becomes an inert replacement expression
//! supplied by the caller. Only the callee token is touched: argument lists, trailing commas and multi-line calls stay
//! syntactically valid, and the statement still parses in expression position (`() => document.addEventListener(..)`).
//!
//! The match is textual. Only bare receivers match: member chains such as `frame.window.addEventListener(..)` are
//! left alone. Aliased receivers (`const d = document; d.addEventListener(..)`), computed members and optional
//! chaining are not rewritten either. Registrations mentioned inside comments and string literals are rewritten too,
//! so the replacement must be a plain expression (an identifier path) that stays inert in any of those positions.

use regex::{Captures, Regex};

/// Text after sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    /// Number of registration call sites rewritten.
    pub neutralized: usize,
}

/// Rewrites `<target>.addEventListener` for a fixed set of receiver names.
#[derive(Debug, Clone)]
pub struct ListenerSanitizer {
    pattern: Option<Regex>,
    replacement: String,
}

impl ListenerSanitizer {
    /// Build a sanitizer for the given receiver names (for example `document`, `window`).
    ///
    /// `replacement` is inserted verbatim in place of `<target>.addEventListener`.
    ///
    /// ## Errors
    ///
    /// Returns the regex error if the combined pattern fails to compile (receiver names are escaped, so this only
    /// happens when the pattern exceeds the regex size limit).
    pub fn new<S: AsRef<str>>(targets: &[S], replacement: impl Into<String>) -> Result<Self, regex::Error> {
        let names: Vec<String> = targets
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        let pattern = if names.is_empty() {
            None
        } else {
            // Group 1 is the character before the receiver; it must not continue a member chain or an identifier.
            Some(Regex::new(&format!(
                r"(^|[^.\w$])(?:{})\s*\.\s*addEventListener\b",
                names.join("|")
            ))?)
        };

        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    pub fn sanitize(&self, source: &str) -> Sanitized {
        let Some(re) = &self.pattern else {
            return Sanitized {
                text: source.to_string(),
                neutralized: 0,
            };
        };
        let neutralized = re.find_iter(source).count();
        let text = re
            .replace_all(source, |caps: &Captures<'_>| format!("{}{}", &caps[1], self.replacement))
            .into_owned();
        Sanitized { text, neutralized }
    }

    /// Count registrations the sanitizer would rewrite.
    pub fn count(&self, source: &str) -> usize {
        self.pattern.as_ref().map_or(0, |re| re.find_iter(source).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> ListenerSanitizer {
        ListenerSanitizer::new(&["document", "window"], "noop").unwrap()
    }

    #[test]
    fn test_rewrites_document_and_window() {
        let out = sanitizer().sanitize("document.addEventListener('a', f);\nwindow.addEventListener('b', g);");
        assert_eq!(out.neutralized, 2);
        assert_eq!(out.text, "noop('a', f);\nnoop('b', g);");
    }

    #[test]
    fn test_multiline_call_keeps_argument_list() {
        let src = "document.addEventListener('DOMContentLoaded', () => {\n  init();\n});";
        let out = sanitizer().sanitize(src);
        assert_eq!(out.text, "noop('DOMContentLoaded', () => {\n  init();\n});");
    }

    #[test]
    fn test_element_listeners_untouched() {
        let src = "button.addEventListener('click', f); mydocument.addEventListener('x', g);";
        let out = sanitizer().sanitize(src);
        assert_eq!(out.neutralized, 0);
        assert_eq!(out.text, src);
    }

    #[test]
    fn test_member_chains_untouched() {
        let src = concat!(
            "a.document.addEventListener('x', f); ",
            "frame.window.addEventListener('y', g); ",
            "$window.addEventListener();"
        );
        let out = sanitizer().sanitize(src);
        assert_eq!(out.neutralized, 0);
        assert_eq!(out.text, src);
    }

    #[test]
    fn test_preceding_character_is_kept() {
        let src = "init();document.addEventListener('a', f);\n(window.addEventListener)('b', g)";
        let out = sanitizer().sanitize(src);
        assert_eq!(out.neutralized, 2);
        assert_eq!(out.text, "init();noop('a', f);\n(noop)('b', g)");
    }

    #[test]
    fn test_registration_at_start_of_input() {
        assert_eq!(sanitizer().sanitize("window.addEventListener()").text, "noop()");
    }

    #[test]
    fn test_whitespace_around_dot() {
        assert_eq!(sanitizer().count("window .\n  addEventListener('resize', r)"), 1);
    }

    #[test]
    fn test_no_targets_is_noop() {
        let empty: [&str; 0] = [];
        let s = ListenerSanitizer::new(&empty, "noop").unwrap();
        assert_eq!(s.sanitize("document.addEventListener('a', f)").neutralized, 0);
    }

    #[test]
    fn test_replacement_is_literal() {
        let s = ListenerSanitizer::new(&["document"], "$1 /* x */").unwrap();
        assert_eq!(s.sanitize("document.addEventListener()").text, "$1 /* x */()");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sanitized output never contains a registration the sanitizer would still rewrite.
        #[test]
        fn sanitize_leaves_no_registrations(
            chunks in proptest::collection::vec(
                prop_oneof![
                    Just("document.addEventListener".to_string()),
                    Just("window.addEventListener".to_string()),
                    Just("(".to_string()),
                    Just("document".to_string()),
                    Just(".".to_string()),
                    "[a-z ;\n]{0,8}",
                ],
                0..24,
            )
        ) {
            let s = ListenerSanitizer::new(&["document", "window"], "__noop").unwrap();
            let source = chunks.concat();
            let out = s.sanitize(&source);
            prop_assert_eq!(s.count(&out.text), 0);
            prop_assert_eq!(out.neutralized, s.count(&source));
        }
    }
}
