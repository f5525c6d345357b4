//! Records produced by the behaviour extractors.

use serde::{Deserialize, Serialize};

/// Semantic hook a behaviour is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviourType {
    // Data-access behaviours
    Create,
    Update,
    Delete,
    Read,
    ReadList,

    // Entity instance behaviours
    Initialize,
    BeforeChange,
    AfterChange,
    BeforeSave,
    AfterSave,
    Action,
    Formula,
    BeforeCollectionEntityInitialize,
}

impl BehaviourType {
    /// Whether this is a data-access (CRUD) behaviour.
    pub fn is_data_behaviour(&self) -> bool {
        matches!(
            self,
            Self::Create | Self::Update | Self::Delete | Self::Read | Self::ReadList
        )
    }
}

impl std::fmt::Display for BehaviourType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One method body bound to a hook type and an optional target attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Behaviour {
    pub name: String,
    pub description: String,
    pub expression: String,
    #[serde(rename = "type")]
    pub behaviour_type: BehaviourType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

/// Behaviours recovered from one generated entity or data-access file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    /// Fully-qualified namespace of the file.
    pub namespace: String,
    /// Behaviours in declaration order.
    pub behaviours: Vec<Behaviour>,
    /// Non-default imports in declaration order.
    pub usings: Vec<String>,
}

impl Entity {
    /// Instance behaviours (everything that is not data access).
    pub fn entity_behaviours(&self) -> Vec<&Behaviour> {
        self.behaviours
            .iter()
            .filter(|b| !b.behaviour_type.is_data_behaviour())
            .collect()
    }

    /// Data-access behaviours.
    pub fn data_behaviours(&self) -> Vec<&Behaviour> {
        self.behaviours
            .iter()
            .filter(|b| b.behaviour_type.is_data_behaviour())
            .collect()
    }
}

/// A standalone application-level behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationBehaviour {
    pub namespace: String,
    pub name: String,
    pub description: String,
    pub expression: String,
    pub usings: Vec<String>,
}
