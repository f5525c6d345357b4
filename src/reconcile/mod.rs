//! Reconciliation of extracted records with remote model definitions.
//!
//! Remote definitions are updated with JSON Patch documents that only touch
//! fields the local record has a value for. State machines are stored
//! remotely as positional arrays, so local states and transitions are first
//! matched by name to find the array index each update addresses.
//!
//! ## Components
//!
//! - [`patch`]: `PatchDocument` and its operations
//! - [`document`]: read-only view over a fetched model document
//! - [`state`]: local state-machine definitions
//! - [`builder`]: sparse and positional patch construction
//! - [`service`]: fetch, build and apply against a [`crate::api::ModelApi`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use behaviour_sync::api::HttpModelApi;
//! use behaviour_sync::reconcile::{DefinitionService, State};
//!
//! let service = DefinitionService::new(HttpModelApi::from_env()?, "T99")
//!     .with_environment("QA");
//!
//! let states = vec![State::new("Active").with_assign_to_expression("owner")];
//! let outcome = service.replace_state_data("Order", &states).await;
//! if !outcome.is_success() {
//!     eprintln!("Order: {:?}", outcome);
//! }
//! ```

pub mod builder;
pub mod document;
pub mod patch;
pub mod service;
pub mod state;

mod proptest;

pub use builder::{BehaviourNamespace, PatchBuilder};
pub use document::{RemoteArray, RemoteDocument, RemoteNode};
pub use patch::{PatchDocument, PatchOp, PatchOperation};
pub use service::{DefinitionService, ReconcileOutcome, DEFAULT_ENVIRONMENT};
pub use state::{State, Transition};
