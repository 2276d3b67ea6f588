//! Smoke run configuration

use super::fixture::MockState;

/// Knobs for one smoke run. The defaults reproduce the dashboard check: call `renderDashboard()` with one seeded
/// employee, after neutralizing `document` / `window` listener registrations.
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    /// Function called with no arguments once the app is loaded. May be a dotted path (`App.render`).
    pub entry_point: String,
    /// Receivers whose `addEventListener` calls are neutralized before evaluation.
    pub listener_targets: Vec<String>,
    /// State assigned into the app's global `state` object.
    pub state: MockState,
    /// Name used for the app script in messages.
    pub source_label: String,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            entry_point: "renderDashboard".to_string(),
            listener_targets: vec!["document".to_string(), "window".to_string()],
            state: MockState::default(),
            source_label: "app.js".to_string(),
        }
    }
}

impl SmokeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn with_listener_targets<S: Into<String>>(mut self, targets: impl IntoIterator<Item = S>) -> Self {
        self.listener_targets = targets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_state(mut self, state: MockState) -> Self {
        self.state = state;
        self
    }

    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_point() {
        assert_eq!(SmokeConfig::default().entry_point, "renderDashboard");
    }

    #[test]
    fn test_default_listener_targets() {
        assert_eq!(SmokeConfig::default().listener_targets, vec!["document", "window"]);
    }

    #[test]
    fn test_default_state_has_one_employee() {
        let config = SmokeConfig::default();
        assert_eq!(config.state.employees.len(), 1);
        assert!(config.state.attendance.is_empty());
    }

    #[test]
    fn test_builders() {
        let config = SmokeConfig::new()
            .with_entry_point("renderCalendar")
            .with_listener_targets(["document"])
            .with_source_label("build/app.js");
        assert_eq!(config.entry_point, "renderCalendar");
        assert_eq!(config.listener_targets, vec!["document"]);
        assert_eq!(config.source_label, "build/app.js");
    }
}
