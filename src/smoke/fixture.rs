//! Minimal application state seeded into the loaded script before the entry point runs.

use serde::Serialize;
use serde_json::{Map, Value};

/// One row of `state.employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub default_shift: String,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>, default_shift: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_shift: default_shift.into(),
        }
    }
}

/// The two fields assigned into the app's `state` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MockState {
    pub employees: Vec<Employee>,
    pub attendance: Map<String, Value>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            employees: vec![Employee::new("emp1", "John Doe", "opt1")],
            attendance: Map::new(),
        }
    }
}

impl MockState {
    /// Script assigning `state.employees` and `state.attendance`.
    ///
    /// Assumes the app declares a global `state` object; if it does not, the script throws a `ReferenceError` when
    /// evaluated, which the harness reports like any other failure.
    pub fn seed_script(&self) -> Result<String, serde_json::Error> {
        Ok(format!(
            "state.employees = {};\nstate.attendance = {};",
            serde_json::to_string(&self.employees)?,
            serde_json::to_string(&self.attendance)?
        ))
    }
}
