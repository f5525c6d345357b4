//! Property-based tests for patch construction.
//!
//! - Every state path addresses the remote slot holding the same name
//! - A patch built against a document that already holds the local values
//!   leaves it unchanged when applied
//! - Empty local fields never produce an operation

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{json, Value};

    use crate::extract::{Behaviour, BehaviourType, Entity};
    use crate::reconcile::builder::PatchBuilder;
    use crate::reconcile::document::RemoteDocument;
    use crate::reconcile::state::State;

    const TRANSITIONS: [&str; 3] = ["approve", "cancel", "close"];

    fn local_state(name: String) -> impl Strategy<Value = State> {
        (
            "[a-z.]{0,8}",
            prop::collection::vec("[A-Z][a-z]{0,5}", 0..3),
            prop::sample::subsequence(TRANSITIONS.to_vec(), 0..=TRANSITIONS.len()),
        )
            .prop_map(move |(assign, behaviours, transitions)| {
                let mut state = State::new(name.clone()).with_assign_to_expression(assign);
                state.behaviours = behaviours;
                for t in transitions {
                    state = state.with_transition(t, format!("return {};", t));
                }
                state
            })
    }

    /// Remote state names in storage order plus local states for a subset of
    /// them and one local-only state.
    fn machine() -> impl Strategy<Value = (Vec<String>, Vec<State>)> {
        prop::collection::hash_set("[a-z]{1,6}", 1..6)
            .prop_map(|names| names.into_iter().collect::<Vec<_>>())
            .prop_flat_map(|remote| {
                let len = remote.len();
                (Just(remote.clone()), prop::sample::subsequence(remote, 0..=len))
            })
            .prop_flat_map(|(remote, mut chosen)| {
                chosen.push("Unknown".to_string());
                let states: Vec<_> = chosen.into_iter().map(local_state).collect();
                (Just(remote), states)
            })
    }

    fn remote_document(names: &[String], locals: &[State], in_sync: bool) -> Value {
        let states: Vec<Value> = names
            .iter()
            .map(|name| {
                let local = locals.iter().find(|s| &s.name == name).filter(|_| in_sync);
                let transitions: Vec<Value> = TRANSITIONS
                    .iter()
                    .map(|t| {
                        let expression = local
                            .and_then(|s| s.transition(t))
                            .map(|tr| tr.expression.clone())
                            .unwrap_or_default();
                        json!({ "name": t, "expression": expression })
                    })
                    .collect();
                json!({
                    "name": name,
                    "assignToExpression": local.map(|s| s.assign_to_expression.clone()).unwrap_or_default(),
                    "behaviours": local.map(|s| s.behaviours.clone()).unwrap_or_default(),
                    "transitions": transitions,
                })
            })
            .collect();
        json!({ "name": "Machine", "states": states })
    }

    fn behaviour(behaviour_type: BehaviourType) -> Behaviour {
        Behaviour {
            name: behaviour_type.to_string(),
            description: String::new(),
            expression: "Run();".to_string(),
            behaviour_type,
            attribute: None,
        }
    }

    proptest! {
        /// State indices come from the remote array, never the local one.
        #[test]
        fn state_paths_follow_remote_positions((names, locals) in machine()) {
            let remote = RemoteDocument::new(remote_document(&names, &locals, false));
            let patch = PatchBuilder::states(&locals, &remote).unwrap();

            for path in patch.paths() {
                let index: usize = path.split('/').nth(2).unwrap().parse().unwrap();
                let remote_name = &names[index];
                prop_assert!(locals.iter().any(|s| &s.name == remote_name));
            }
        }

        /// Applying a patch to a document already holding the local values is a no-op.
        #[test]
        fn state_patch_is_idempotent((names, locals) in machine()) {
            let original = remote_document(&names, &locals, true);
            let patch = PatchBuilder::states(&locals, &RemoteDocument::new(original.clone())).unwrap();

            let mut patched = original.clone();
            patch.apply(&mut patched).unwrap();
            prop_assert_eq!(patched, original);
        }

        /// Only non-empty entity fields are replaced.
        #[test]
        fn entity_patch_skips_empty_fields(
            instance in prop::bool::ANY,
            data in prop::bool::ANY,
            usings in prop::collection::vec("[A-Z][a-z]{1,4}\\.[A-Z][a-z]{1,4}", 0..3),
        ) {
            let mut behaviours = Vec::new();
            if instance {
                behaviours.push(behaviour(BehaviourType::BeforeSave));
            }
            if data {
                behaviours.push(behaviour(BehaviourType::ReadList));
            }
            let entity = Entity {
                namespace: "Omnia.Behaviours.T1.Internal.Sys".to_string(),
                behaviours,
                usings: usings.clone(),
            };

            let patch = PatchBuilder::entity(&entity).unwrap();
            let paths = patch.paths();
            prop_assert_eq!(paths.contains(&"/entityBehaviours"), instance);
            prop_assert_eq!(paths.contains(&"/dataBehaviours"), data);
            prop_assert_eq!(paths.contains(&"/behaviourNamespaces"), !usings.is_empty());
        }
    }
}
