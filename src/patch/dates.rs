//! `egypt-date-key`: compute "today" in Cairo time instead of the browser's local zone.

use dashcheck_core::RewriteRule;

use super::PatchSet;

/// The helper is inserted right after this function's body (up to the first `}` at column 0).
const ANCHOR: &str = r"function getEgyptTimeMinutes\(\) \{[\s\S]*?\n\}";

const HELPER: &str = r#"

function getCurrentEgyptDateKey() {
  const dtf = new Intl.DateTimeFormat('en-US', { timeZone: 'Africa/Cairo', year: 'numeric', month: '2-digit', day: '2-digit' });
  const parts = dtf.formatToParts(new Date());
  const m = parts.find(p => p.type === 'month').value;
  const d = parts.find(p => p.type === 'day').value;
  const y = parts.find(p => p.type === 'year').value;
  return `${y}-${m}-${d}`;
}
"#;

pub fn egypt_date_key() -> PatchSet {
    PatchSet::new(
        "egypt-date-key",
        vec![
            RewriteRule::insert_after("insert-date-key-helper", ANCHOR, HELPER)
                .unless("function getCurrentEgyptDateKey"),
            RewriteRule::literal("use-egypt-date-key", "getDateKey(new Date())", "getCurrentEgyptDateKey()"),
        ],
    )
}
