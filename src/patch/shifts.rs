//! `shift-start`: evaluate shifts against Cairo time and treat employees whose shift has not started yet as
//! neither in the office nor remote.

use dashcheck_core::RewriteRule;

use super::PatchSet;

const MINUTES_HELPER: &str = r#"
function getEgyptTimeMinutes() {
  const dtf = new Intl.DateTimeFormat('en-US', { timeZone: 'Africa/Cairo', hour: '2-digit', minute: '2-digit', hour12: false });
  const parts = dtf.formatToParts(new Date());
  const hour = parseInt(parts.find(p => p.type === 'hour').value, 10);
  const minute = parseInt(parts.find(p => p.type === 'minute').value, 10);
  return hour * 60 + minute;
}

"#;

const LOCAL_MINUTES: &str =
    r"const now = new Date\(\);\s*const currentMinutes = now\.getHours\(\) \* 60 \+ now\.getMinutes\(\);";

const FINISHED_BLOCK: &str = r"      let isFinished = false;
      if \(status !== 'leave'\) \{
        const shiftText = getShiftString\(record\?\.shift \|\| (emp\.defaultShift|getDefaultShift\(emp\))\);
        const endTimeStr = shiftText\.split\('-'\)\[1\]\?\.trim\(\);
        if \(endTimeStr\) \{
          const \[hours, mins\] = endTimeStr\.split\(':'\)\.map\(Number\);
          if \(currentMinutes >= hours \* 60 \+ mins\) \{
            isFinished = true;
          \}
        \}
      \}";

// `${1}` keeps whichever default-shift expression the block used.
const STARTED_BLOCK: &str = r"      let isFinished = false;
      let isStarted = true;
      if (status !== 'leave') {
        const shiftText = getShiftString(record?.shift || ${1});
        const parts = shiftText.split('-');
        const startTimeStr = parts[0]?.trim();
        const endTimeStr = parts[1]?.trim();
        if (endTimeStr) {
          const [hours, mins] = endTimeStr.split(':').map(Number);
          if (currentMinutes >= hours * 60 + mins) isFinished = true;
        }
        if (startTimeStr) {
          const [sHours, sMins] = startTimeStr.split(':').map(Number);
          if (currentMinutes < sHours * 60 + sMins) isStarted = false;
        }
      }";

const FILTER_FINISHED: &str =
    "if (isFinished) return false; // If filtering by anything other than finished, hide finished people";

const FILTER_NOT_STARTED: &str = "if (isFinished) return false; // If filtering by anything other than finished, hide finished people
      if (!isStarted && (status === 'office' || status === 'remote')) return false;";

const STATS_COUNT: &str = r"    if \(status === 'leave'\) \{
      leave\+\+;
    \} else if \(isFinished\) \{
      finished\+\+;
    \} else if \(status === 'office'\) \{
      office\+\+;
    \} else if \(status === 'remote'\) \{
      remote\+\+;
    \}";

const STATS_COUNT_STARTED: &str = "    if (status === 'leave') {
      leave++;
    } else if (isFinished) {
      finished++;
    } else if (!isStarted && (status === 'office' || status === 'remote')) {
      // Do not count as office/remote until shift starts
    } else if (status === 'office') {
      office++;
    } else if (status === 'remote') {
      remote++;
    }";

const EXPORT_COUNT: &str = r"      if \(status === 'leave'\) leaveCount\+\+;
      else if \(isFinished\) finishedCount\+\+;
      else if \(status === 'office'\) officeCount\+\+;
      else if \(status === 'remote'\) remoteCount\+\+;";

const EXPORT_COUNT_STARTED: &str = "      if (status === 'leave') leaveCount++;
      else if (isFinished) finishedCount++;
      else if (!isStarted && (status === 'office' || status === 'remote')) { /* skip */ }
      else if (status === 'office') officeCount++;
      else if (status === 'remote') remoteCount++;";

const RAMADAN_DAY: &str = r"    if \(currentLang === 'ja'\) dayEl\.textContent = `\$\{d\}日`;
    else if \(currentLang === 'en'\) dayEl\.textContent = `Day \$\{d\}`;
    else dayEl\.textContent = `يوم \$\{d\}`;";

const RAMADAN_DAY_NUMBER: &str = "    if (currentLang === 'ja') dayEl.textContent = `${d}日`;
    else dayEl.textContent = `${d}`; // EN/AR line 2 is just the number";

pub fn shift_start() -> PatchSet {
    PatchSet::new(
        "shift-start",
        vec![
            RewriteRule::prepend("add-egypt-minutes-helper", MINUTES_HELPER).unless("function getEgyptTimeMinutes"),
            RewriteRule::regex(
                "use-egypt-minutes",
                LOCAL_MINUTES,
                "const currentMinutes = getEgyptTimeMinutes();",
            ),
            RewriteRule::regex_expanding("compute-is-started", FINISHED_BLOCK, STARTED_BLOCK),
            RewriteRule::literal("hide-not-started", FILTER_FINISHED, FILTER_NOT_STARTED).unless("if (!isStarted"),
            RewriteRule::regex("stats-skip-not-started", STATS_COUNT, STATS_COUNT_STARTED),
            RewriteRule::regex("export-skip-not-started", EXPORT_COUNT, EXPORT_COUNT_STARTED),
            RewriteRule::regex("ramadan-day-number", RAMADAN_DAY, RAMADAN_DAY_NUMBER),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = include_str!("../../tests/fixtures/shift_app.js");

    fn rule_count(report: &super::super::PatchReport, name: &str) -> usize {
        report
            .rules
            .iter()
            .find(|r| r.rule == name)
            .map(|r| r.replacements)
            .unwrap_or_default()
    }

    #[test]
    fn test_every_rule_applies_once() {
        let report = shift_start().apply(APP).unwrap();
        for rule in &report.rules {
            assert_eq!(rule.replacements, 1, "rule `{}` should apply exactly once", rule.rule);
        }
    }

    #[test]
    fn test_helper_is_prepended() {
        let report = shift_start().apply(APP).unwrap();
        assert!(report.text.starts_with("\nfunction getEgyptTimeMinutes() {"));
        assert!(report.text.contains("const currentMinutes = getEgyptTimeMinutes();"));
        assert!(!report.text.contains("now.getHours()"));
    }

    #[test]
    fn test_shift_block_keeps_default_shift_expression() {
        let report = shift_start().apply(APP).unwrap();
        assert!(report.text.contains("getShiftString(record?.shift || getDefaultShift(emp));"));
        assert!(report.text.contains("if (currentMinutes < sHours * 60 + sMins) isStarted = false;"));
    }

    #[test]
    fn test_counts_skip_not_started() {
        let report = shift_start().apply(APP).unwrap();
        assert!(report.text.contains("// Do not count as office/remote until shift starts"));
        assert!(report.text.contains("{ /* skip */ }"));
        assert!(report.text.contains("if (!isStarted && (status === 'office' || status === 'remote')) return false;"));
    }

    #[test]
    fn test_ramadan_label_keeps_template_placeholders() {
        let report = shift_start().apply(APP).unwrap();
        assert!(report.text.contains("else dayEl.textContent = `${d}`; // EN/AR line 2 is just the number"));
        assert!(!report.text.contains("`Day ${d}`"));
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let first = shift_start().apply(APP).unwrap();
        let second = shift_start().apply(&first.text).unwrap();
        assert!(!second.changed());
        assert_eq!(rule_count(&second, "compute-is-started"), 0);
        assert_eq!(rule_count(&second, "hide-not-started"), 0);
    }

    #[test]
    fn test_unrelated_source_only_gets_helper() {
        let report = shift_start().apply("renderDashboard();\n").unwrap();
        assert_eq!(report.skipped().count(), 6);
        assert!(report.text.ends_with("\nrenderDashboard();\n"));
    }
}
