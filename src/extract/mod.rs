//! Behaviour extraction from generated C# sources.
//!
//! Generated files follow fixed conventions: method names encode the hook a
//! body implements, a leading doc comment carries the display name and
//! description, and a block of default imports is always present. The
//! readers here recover [`Behaviour`] records from those conventions.
//!
//! ## Dialects
//!
//! - [`Dialect::DataAccess`]: `CreateAsync`, `ReadAsync`, ... Any other
//!   method name is an error.
//! - [`Dialect::EntityInstance`]: `ExecuteInitialize`, `On<attr>PropertyChange`,
//!   `Get<attr>`, ... Other methods are ignored. Expressions keep the source
//!   layout of the statements.
//! - [`Dialect::Application`]: the first method of the file is the behaviour.
//!
//! Behaviours whose body is empty are dropped, never reported.
//!
//! ## Example
//!
//! ```rust,ignore
//! use behaviour_sync::extract::{ApplicationBehaviourReader, BehaviourReader};
//!
//! let entity = BehaviourReader::entity_instance().extract_entity(&source)?;
//! for behaviour in &entity.behaviours {
//!     println!("{} ({})", behaviour.name, behaviour.behaviour_type);
//! }
//!
//! let app = ApplicationBehaviourReader::new().extract_data(&other_source)?;
//! ```

pub mod comment;
pub mod convention;
pub mod expression;
pub mod reader;
pub mod types;

mod proptest;

pub use comment::{DocSummary, LINE_ENDING};
pub use convention::Dialect;
pub use reader::{
    ApplicationBehaviourReader, BehaviourReader, BEHAVIOUR_NAMESPACE_PREFIX, DEFAULT_USINGS,
};
pub use types::{ApplicationBehaviour, Behaviour, BehaviourType, Entity};
