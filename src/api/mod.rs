//! Boundary to the remote model API.
//!
//! [`ModelApi`] is the seam the definition service talks through: fetch a
//! document, apply a JSON Patch. [`HttpModelApi`] is the HTTP implementation,
//! configured in code or from the environment:
//!
//! - `BEHAVIOUR_SYNC_API_URL`: base URL (required)
//! - `BEHAVIOUR_SYNC_TOKEN`: bearer token
//! - `BEHAVIOUR_SYNC_TIMEOUT`: request timeout in seconds (default 30)
//!
//! No retries are made; a failed request surfaces as [`crate::Error::Api`]
//! or [`crate::Error::Transport`].

pub mod client;
pub mod types;

pub use client::{HttpModelApi, ModelApi, ModelApiConfig};
pub use types::{ApiError, ValidationError};
