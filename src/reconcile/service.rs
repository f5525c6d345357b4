//! Fetch, diff and apply against the model API.

use tracing::{debug, info, instrument, warn};

use super::builder::PatchBuilder;
use super::document::RemoteDocument;
use super::patch::PatchDocument;
use super::state::State;
use crate::api::{ApiError, ModelApi};
use crate::error::Error;
use crate::extract::{ApplicationBehaviour, Entity};

/// Environment used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "PRD";

/// Result of reconciling one record.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// Patch sent and accepted.
    Applied { operations: usize },
    /// Nothing to change; no request was sent.
    Unchanged,
    /// The remote document is missing or is not the expected one.
    NoMatchingMetadata,
    /// The patch was rejected.
    Rejected(ApiError),
}

impl ReconcileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Applied { .. } | Self::Unchanged)
    }
}

/// Reconciles extracted records with the model definitions of one tenant
/// environment.
///
/// Each call makes at most two requests, a fetch and a patch. The remote
/// document may change in between; positions computed from the fetch are
/// assumed to still hold when the patch is applied.
pub struct DefinitionService<A: ModelApi> {
    api: A,
    tenant: String,
    environment: String,
}

impl<A: ModelApi> DefinitionService<A> {
    pub fn new(api: A, tenant: impl Into<String>) -> Self {
        Self {
            api,
            tenant: tenant.into(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn model_path(&self, suffix: &str) -> String {
        format!("/api/v1/{}/{}/model/{}", self.tenant, self.environment, suffix)
    }

    /// Replace the expression and imports of an application behaviour.
    #[instrument(skip(self, behaviour), fields(tenant = %self.tenant, environment = %self.environment))]
    pub async fn replace_application_behaviour(
        &self,
        entity: &str,
        behaviour: &ApplicationBehaviour,
    ) -> ReconcileOutcome {
        let patch = match PatchBuilder::application_behaviour(behaviour) {
            Ok(patch) => patch,
            Err(e) => return build_failure(e),
        };
        self.send(&self.model_path(&format!("ApplicationBehaviour/{}", entity)), &patch)
            .await
    }

    /// Replace state expressions, behaviours and transition expressions of a
    /// state machine, matching states by name.
    #[instrument(skip(self, states), fields(tenant = %self.tenant, environment = %self.environment))]
    pub async fn replace_state_data(&self, entity: &str, states: &[State]) -> ReconcileOutcome {
        let path = self.model_path(&format!("StateMachine/{}", entity));

        let Some(remote) = self.fetch(&path).await else {
            return ReconcileOutcome::NoMatchingMetadata;
        };
        if !remote.is_named(entity) {
            warn!(found = ?remote.get_string("name"), "State machine name does not match");
            return ReconcileOutcome::NoMatchingMetadata;
        }

        if states.is_empty() {
            return ReconcileOutcome::Unchanged;
        }
        let Some(patch) = PatchBuilder::states(states, &remote) else {
            warn!("State machine has no states");
            return ReconcileOutcome::NoMatchingMetadata;
        };

        self.send(&path, &patch).await
    }

    /// Replace the behaviours and imports of an entity. The definition type
    /// addressing the patch is resolved from the entity's output definition.
    #[instrument(skip(self, data), fields(tenant = %self.tenant, environment = %self.environment))]
    pub async fn replace_entity_data(&self, entity: &str, data: &Entity) -> ReconcileOutcome {
        let definitions = self.model_path(&format!("output/definitions/{}", entity));

        let Some(remote) = self.fetch(&definitions).await else {
            return ReconcileOutcome::NoMatchingMetadata;
        };
        let Some(definition) = remote.instance_of() else {
            warn!("Output definition has no instanceOf");
            return ReconcileOutcome::NoMatchingMetadata;
        };

        let patch = match PatchBuilder::entity(data) {
            Ok(patch) => patch,
            Err(e) => return build_failure(e),
        };
        self.send(&self.model_path(&format!("{}/{}", definition, entity)), &patch)
            .await
    }

    async fn fetch(&self, path: &str) -> Option<RemoteDocument> {
        match self.api.get(path).await {
            Ok(value) => Some(RemoteDocument::new(value)),
            Err(e) => {
                warn!(path, error = %e, "Failed to fetch model document");
                None
            }
        }
    }

    async fn send(&self, path: &str, patch: &PatchDocument) -> ReconcileOutcome {
        if patch.is_empty() {
            debug!(path, "Nothing to patch");
            return ReconcileOutcome::Unchanged;
        }

        match self.api.patch(path, patch).await {
            Ok(()) => {
                info!(path, operations = patch.len(), "Applied patch");
                ReconcileOutcome::Applied {
                    operations: patch.len(),
                }
            }
            Err(e) => {
                warn!(path, error = %e, "Patch rejected");
                ReconcileOutcome::Rejected(into_api_error(e))
            }
        }
    }
}

fn into_api_error(error: Error) -> ApiError {
    match error {
        Error::Api(api_error) => api_error,
        other => ApiError::new("", other.to_string()),
    }
}

fn build_failure(error: Error) -> ReconcileOutcome {
    warn!(error = %error, "Failed to build patch");
    ReconcileOutcome::Rejected(into_api_error(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::extract::{Behaviour, BehaviourType};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory model API recording every patch it receives.
    #[derive(Default)]
    struct MockModelApi {
        documents: HashMap<String, Value>,
        reject_with: Option<ApiError>,
        patches: Mutex<Vec<(String, PatchDocument)>>,
    }

    impl MockModelApi {
        fn with_document(mut self, path: &str, document: Value) -> Self {
            self.documents.insert(path.to_string(), document);
            self
        }

        fn rejecting(mut self, error: ApiError) -> Self {
            self.reject_with = Some(error);
            self
        }

        fn patches(&self) -> Vec<(String, PatchDocument)> {
            self.patches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelApi for MockModelApi {
        async fn get(&self, path: &str) -> Result<Value> {
            self.documents
                .get(path)
                .cloned()
                .ok_or_else(|| Error::Api(ApiError::from_status(404, Some("Not Found"))))
        }

        async fn patch(&self, path: &str, patch: &PatchDocument) -> Result<()> {
            self.patches
                .lock()
                .unwrap()
                .push((path.to_string(), patch.clone()));
            match &self.reject_with {
                Some(error) => Err(Error::Api(error.clone())),
                None => Ok(()),
            }
        }
    }

    const MACHINE_PATH: &str = "/api/v1/T99/PRD/model/StateMachine/Order";

    fn machine() -> Value {
        json!({
            "name": "Order",
            "states": [
                { "name": "Draft", "assignToExpression": "", "transitions": [] },
                {
                    "name": "Active",
                    "assignToExpression": "",
                    "transitions": [
                        { "name": "cancel", "expression": "" },
                        { "name": "close", "expression": "" },
                    ],
                },
            ],
        })
    }

    fn entity() -> Entity {
        Entity {
            namespace: "Omnia.Behaviours.T99.Internal.System.Model".to_string(),
            behaviours: vec![Behaviour {
                name: "Initialize".to_string(),
                description: String::new(),
                expression: "this._name = \"x\";".to_string(),
                behaviour_type: BehaviourType::Initialize,
                attribute: None,
            }],
            usings: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_state_data_patches_matching_positions() {
        let api = MockModelApi::default().with_document(MACHINE_PATH, machine());
        let service = DefinitionService::new(api, "T99");

        let states = vec![State::new("Active")
            .with_assign_to_expression("owner")
            .with_transition("close", "return true;")
            .with_transition("archive", "return false;")];
        let outcome = service.replace_state_data("Order", &states).await;

        assert_eq!(outcome, ReconcileOutcome::Applied { operations: 2 });
        let patches = service.api().patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, MACHINE_PATH);
        assert_eq!(
            patches[0].1.paths(),
            vec!["/states/1/assignToExpression", "/states/1/transitions/1/expression"]
        );
    }

    #[tokio::test]
    async fn test_state_data_name_mismatch() {
        let mut document = machine();
        document["name"] = json!("Invoice");
        let api = MockModelApi::default().with_document(MACHINE_PATH, document);
        let service = DefinitionService::new(api, "T99");

        let outcome = service
            .replace_state_data("Order", &[State::new("Active")])
            .await;

        assert_eq!(outcome, ReconcileOutcome::NoMatchingMetadata);
        assert!(!outcome.is_success());
        assert!(service.api().patches().is_empty());
    }

    #[tokio::test]
    async fn test_state_data_fetch_failure() {
        let service = DefinitionService::new(MockModelApi::default(), "T99");
        let outcome = service
            .replace_state_data("Order", &[State::new("Active")])
            .await;
        assert_eq!(outcome, ReconcileOutcome::NoMatchingMetadata);
    }

    #[tokio::test]
    async fn test_state_data_without_states_field() {
        let api = MockModelApi::default().with_document(MACHINE_PATH, json!({ "name": "Order" }));
        let service = DefinitionService::new(api, "T99");
        let outcome = service
            .replace_state_data("Order", &[State::new("Active")])
            .await;
        assert_eq!(outcome, ReconcileOutcome::NoMatchingMetadata);
    }

    #[tokio::test]
    async fn test_state_data_unmatched_states_send_nothing() {
        let api = MockModelApi::default().with_document(MACHINE_PATH, machine());
        let service = DefinitionService::new(api, "T99");
        let outcome = service
            .replace_state_data("Order", &[State::new("Closed")])
            .await;

        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert!(outcome.is_success());
        assert!(service.api().patches().is_empty());
    }

    #[tokio::test]
    async fn test_entity_data_resolves_definition() {
        let api = MockModelApi::default().with_document(
            "/api/v1/T99/QA/model/output/definitions/Customer",
            json!({ "name": "Customer", "instanceOf": "Agent" }),
        );
        let service = DefinitionService::new(api, "T99").with_environment("QA");

        let outcome = service.replace_entity_data("Customer", &entity()).await;

        assert_eq!(outcome, ReconcileOutcome::Applied { operations: 1 });
        let patches = service.api().patches();
        assert_eq!(patches[0].0, "/api/v1/T99/QA/model/Agent/Customer");
        assert_eq!(patches[0].1.paths(), vec!["/entityBehaviours"]);
    }

    #[tokio::test]
    async fn test_entity_data_without_instance_of() {
        let api = MockModelApi::default().with_document(
            "/api/v1/T99/PRD/model/output/definitions/Customer",
            json!({ "name": "Customer" }),
        );
        let service = DefinitionService::new(api, "T99");
        let outcome = service.replace_entity_data("Customer", &entity()).await;
        assert_eq!(outcome, ReconcileOutcome::NoMatchingMetadata);
    }

    #[tokio::test]
    async fn test_application_behaviour_rejected() {
        let api = MockModelApi::default().rejecting(ApiError::from_status(403, None));
        let service = DefinitionService::new(api, "T99");
        let behaviour = ApplicationBehaviour {
            namespace: "Omnia.Behaviours.T99.Internal.System".to_string(),
            name: "HelloWorld".to_string(),
            description: String::new(),
            expression: "return null;".to_string(),
            usings: Vec::new(),
        };

        let outcome = service
            .replace_application_behaviour("HelloWorld", &behaviour)
            .await;

        match outcome {
            ReconcileOutcome::Rejected(error) => assert_eq!(error.message, "Access denied!"),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(
            service.api().patches()[0].0,
            "/api/v1/T99/PRD/model/ApplicationBehaviour/HelloWorld"
        );
    }

    #[tokio::test]
    async fn test_application_behaviour_empty_sends_nothing() {
        let service = DefinitionService::new(MockModelApi::default(), "T99");
        let outcome = service
            .replace_application_behaviour("Empty", &ApplicationBehaviour::default())
            .await;
        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert!(service.api().patches().is_empty());
    }
}
