//! Smoke run reporting
//!
//! The harness never prints. It calls a [`SmokeReporter`] at the points where the user should see a line, so the
//! outcome value and the printed text stay independent.

use super::harness::SmokeFailure;

/// Trait for reporting a smoke run.
pub trait SmokeReporter {
    /// The app script evaluated without throwing.
    fn on_loaded(&mut self, _source_label: &str) {}

    /// About to call the entry point.
    fn on_invoke(&mut self, entry_point: &str);

    /// The entry point returned normally.
    fn on_success(&mut self, entry_point: &str);

    /// Something threw between loading and the end of the entry point.
    fn on_failure(&mut self, failure: &SmokeFailure);
}

fn loaded_line() -> String {
    "App loaded".to_string()
}

fn invoke_line(entry_point: &str) -> String {
    format!("Testing {entry_point}...")
}

fn success_line(entry_point: &str) -> String {
    format!("{entry_point} executed successfully without throwing")
}

fn failure_line(failure: &SmokeFailure) -> String {
    format!("CRASH: {}", failure.message)
}

/// Prints progress and success to stdout, failures to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl SmokeReporter for ConsoleReporter {
    fn on_loaded(&mut self, _source_label: &str) {
        println!("{}", loaded_line());
    }

    fn on_invoke(&mut self, entry_point: &str) {
        println!("{}", invoke_line(entry_point));
    }

    fn on_success(&mut self, entry_point: &str) {
        println!("{}", success_line(entry_point));
    }

    fn on_failure(&mut self, failure: &SmokeFailure) {
        eprintln!("{}", failure_line(failure));
    }
}

/// Collects the lines a [`ConsoleReporter`] would print.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub lines: Vec<String>,
}

impl RecordingReporter {
    pub fn success_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.contains("executed successfully")).count()
    }

    pub fn failure_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.starts_with("CRASH:")).count()
    }
}

impl SmokeReporter for RecordingReporter {
    fn on_loaded(&mut self, _source_label: &str) {
        self.lines.push(loaded_line());
    }

    fn on_invoke(&mut self, entry_point: &str) {
        self.lines.push(invoke_line(entry_point));
    }

    fn on_success(&mut self, entry_point: &str) {
        self.lines.push(success_line(entry_point));
    }

    fn on_failure(&mut self, failure: &SmokeFailure) {
        self.lines.push(failure_line(failure));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoke::harness::SmokeStage;

    #[test]
    fn test_recorded_lines_match_console_text() {
        let failure = SmokeFailure::new(SmokeStage::Invoke, "TypeError: boom");
        let mut reporter = RecordingReporter::default();
        reporter.on_loaded("app.js");
        reporter.on_invoke("renderDashboard");
        reporter.on_success("renderDashboard");
        reporter.on_failure(&failure);

        assert_eq!(
            reporter.lines,
            vec![
                loaded_line(),
                invoke_line("renderDashboard"),
                success_line("renderDashboard"),
                failure_line(&failure),
            ]
        );
        assert_eq!(reporter.lines[3], "CRASH: TypeError: boom");
    }

    #[test]
    fn test_line_counters_recognize_shared_formats() {
        let mut reporter = RecordingReporter::default();
        reporter.on_success("renderCalendar");
        reporter.on_failure(&SmokeFailure::new(SmokeStage::Load, "SyntaxError: x"));
        assert_eq!(reporter.success_lines(), 1);
        assert_eq!(reporter.failure_lines(), 1);
    }
}
