//! Local state-machine definitions.

use serde::{Deserialize, Serialize};

/// A state of a state machine, identified by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub name: String,
    #[serde(default)]
    pub assign_to_expression: String,
    #[serde(default)]
    pub behaviours: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// A transition out of a state, identified by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub name: String,
    #[serde(default)]
    pub expression: String,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_assign_to_expression(mut self, expression: impl Into<String>) -> Self {
        self.assign_to_expression = expression.into();
        self
    }

    pub fn with_behaviour(mut self, behaviour: impl Into<String>) -> Self {
        self.behaviours.push(behaviour.into());
        self
    }

    pub fn with_transition(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.transitions.push(Transition {
            name: name.into(),
            expression: expression.into(),
        });
        self
    }

    /// First transition with the given name.
    pub fn transition(&self, name: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let state: State = serde_json::from_str(
            r#"{"name":"Active","transitions":[{"name":"close","expression":"return true;"}]}"#,
        )
        .unwrap();
        assert_eq!(state.name, "Active");
        assert!(state.assign_to_expression.is_empty());
        assert!(state.behaviours.is_empty());
        assert_eq!(state.transition("close").map(|t| t.expression.as_str()), Some("return true;"));
        assert!(state.transition("reopen").is_none());
    }
}
