//! # behaviour-sync
//!
//! Recovers behaviour metadata from generated C# sources and pushes it to the
//! model definitions it was generated from.
//!
//! ## Core Components
//!
//! - **Syntax**: minimal tree-sitter reading of namespaces, imports and methods
//! - **Extract**: naming-convention readers producing `Entity` and
//!   `ApplicationBehaviour` records
//! - **Reconcile**: sparse and positional JSON Patch construction, and the
//!   definition service that fetches and patches remote documents
//! - **Api**: the model API boundary and its HTTP client
//!
//! ## Example
//!
//! ```rust,ignore
//! use behaviour_sync::{BehaviourReader, DefinitionService, HttpModelApi};
//!
//! let entity = BehaviourReader::entity_instance().extract_entity(&source)?;
//!
//! let service = DefinitionService::new(HttpModelApi::from_env()?, "T99");
//! let outcome = service.replace_entity_data("Customer", &entity).await;
//! if !outcome.is_success() {
//!     eprintln!("Customer: {:?}", outcome);
//! }
//! ```

pub mod api;
pub mod error;
pub mod extract;
pub mod reconcile;
pub mod syntax;

// Re-exports for convenience
pub use api::{ApiError, HttpModelApi, ModelApi, ModelApiConfig, ValidationError};
pub use error::{Error, Result};
pub use extract::{
    ApplicationBehaviour, ApplicationBehaviourReader, Behaviour, BehaviourReader, BehaviourType,
    Dialect, Entity,
};
pub use reconcile::{
    BehaviourNamespace, DefinitionService, PatchBuilder, PatchDocument, PatchOp, PatchOperation,
    ReconcileOutcome, RemoteDocument, State, Transition,
};
