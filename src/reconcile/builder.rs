//! Patch construction.
//!
//! Patches are sparse: a field is only touched when the local record has a
//! value for it, so anything extraction could not recover is left alone
//! remotely. Nothing is ever removed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::document::RemoteDocument;
use super::patch::PatchDocument;
use super::state::State;
use crate::error::Result;
use crate::extract::{ApplicationBehaviour, Entity};

const DEFAULT_EXECUTION_LOCATION: &str = "Internal";

/// Remote representation of a custom import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviourNamespace {
    pub name: String,
    pub execution_location: String,
    pub fully_qualified_name: String,
}

impl BehaviourNamespace {
    /// Map an import of a file declared in `namespace`.
    ///
    /// The execution location is the fourth segment of the namespace
    /// (`Omnia.Behaviours.<tenant>.<location>...`).
    pub fn from_using(using: &str, namespace: &str) -> Self {
        Self {
            name: using.replace('.', ""),
            execution_location: namespace
                .split('.')
                .nth(3)
                .unwrap_or(DEFAULT_EXECUTION_LOCATION)
                .to_string(),
            fully_qualified_name: using.to_string(),
        }
    }
}

/// Builds patches from locally extracted records.
pub struct PatchBuilder;

impl PatchBuilder {
    /// Patch for an entity definition: the instance and data behaviour arrays
    /// and the custom imports, each only when non-empty.
    pub fn entity(entity: &Entity) -> Result<PatchDocument> {
        let mut patch = PatchDocument::new();

        let entity_behaviours = entity.entity_behaviours();
        if !entity_behaviours.is_empty() {
            patch.replace("/entityBehaviours", serde_json::to_value(&entity_behaviours)?);
        }

        let data_behaviours = entity.data_behaviours();
        if !data_behaviours.is_empty() {
            patch.replace("/dataBehaviours", serde_json::to_value(&data_behaviours)?);
        }

        if !entity.usings.is_empty() {
            patch.replace(
                "/behaviourNamespaces",
                behaviour_namespaces(&entity.usings, &entity.namespace)?,
            );
        }

        debug!(operations = patch.len(), "Built entity patch");
        Ok(patch)
    }

    /// Patch for an application behaviour: expression and custom imports,
    /// each only when non-empty.
    pub fn application_behaviour(behaviour: &ApplicationBehaviour) -> Result<PatchDocument> {
        let mut patch = PatchDocument::new();

        if !behaviour.expression.is_empty() {
            patch.replace("/expression", behaviour.expression.as_str());
        }

        if !behaviour.usings.is_empty() {
            patch.replace(
                "/behaviourNamespaces",
                behaviour_namespaces(&behaviour.usings, &behaviour.namespace)?,
            );
        }

        debug!(operations = patch.len(), "Built application behaviour patch");
        Ok(patch)
    }

    /// Patch for a state machine, addressed by the remote array positions.
    ///
    /// Remote states and transitions are matched to local ones by name. For
    /// each matched state the assign-to expression is always replaced; the
    /// behaviour list and matched transition expressions only when the local
    /// state has any. Local entries with no remote counterpart are skipped.
    ///
    /// Returns `None` when the remote document has no `states` array.
    pub fn states(states: &[State], remote: &RemoteDocument) -> Option<PatchDocument> {
        let remote_states = remote.get_array("states")?;
        let mut patch = PatchDocument::new();

        for (sn, remote_state) in remote_states.iter() {
            let Some(state) = states.iter().find(|s| Some(s.name.as_str()) == remote_state.name())
            else {
                continue;
            };

            patch.replace(
                format!("/states/{}/assignToExpression", sn),
                state.assign_to_expression.as_str(),
            );

            if !state.behaviours.is_empty() {
                patch.replace(format!("/states/{}/behaviours", sn), state.behaviours.clone());
            }

            if state.transitions.is_empty() {
                continue;
            }
            let Some(remote_transitions) = remote_state.get_array("transitions") else {
                continue;
            };
            for (tn, remote_transition) in remote_transitions.iter() {
                let Some(transition) = remote_transition.name().and_then(|n| state.transition(n))
                else {
                    continue;
                };
                patch.replace(
                    format!("/states/{}/transitions/{}/expression", sn, tn),
                    transition.expression.as_str(),
                );
            }
        }

        debug!(operations = patch.len(), "Built state machine patch");
        Some(patch)
    }
}

fn behaviour_namespaces(usings: &[String], namespace: &str) -> Result<Value> {
    let namespaces: Vec<BehaviourNamespace> = usings
        .iter()
        .map(|using| BehaviourNamespace::from_using(using, namespace))
        .collect();
    Ok(serde_json::to_value(namespaces)?)
}
