//! DOM element id references in script text.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// One distinct id passed to `document.getElementById` with a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdReference {
    pub id: String,
    /// Byte offset of the id literal's contents (first occurrence).
    pub offset: usize,
    /// Byte length of the id.
    pub len: usize,
    /// How many times the id is looked up in the script.
    pub occurrences: usize,
}

fn get_element_by_id_regex() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r#"document\.getElementById\(['"]([^'"]+)['"]\)"#)
            .expect("INVARIANT: getElementById pattern is a valid regex")
    })
}

/// Collect the distinct ids looked up via `document.getElementById('<id>')`, in order of first appearance.
///
/// Dynamic lookups (`getElementById(name)`, template literals) are not visible to this scan.
pub fn referenced_ids(code: &str) -> Vec<IdReference> {
    let mut refs: Vec<IdReference> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for caps in get_element_by_id_regex().captures_iter(code) {
        let Some(id) = caps.get(1) else { continue };
        match index.get(id.as_str()) {
            Some(&pos) => refs[pos].occurrences += 1,
            None => {
                index.insert(id.as_str().to_string(), refs.len());
                refs.push(IdReference {
                    id: id.as_str().to_string(),
                    offset: id.start(),
                    len: id.len(),
                    occurrences: 1,
                });
            }
        }
    }

    refs
}

/// Whether the HTML text declares an element with this id (`id="..."` or `id='...'`).
pub fn declares_id(html: &str, id: &str) -> bool {
    html.contains(&format!("id=\"{id}\"")) || html.contains(&format!("id='{id}'"))
}
