//! Error types for behaviour-sync.

use thiserror::Error;

use crate::api::ApiError;

/// Result type alias using behaviour-sync's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or reconciling behaviours.
#[derive(Error, Debug)]
pub enum Error {
    /// A required syntactic element is missing or malformed
    #[error("Structural error: {message}")]
    Structural { message: String },

    /// Data-access method name outside the supported set
    #[error("Unsupported behaviour method `{method}`")]
    UnsupportedBehaviour { method: String },

    /// Syntax tree could not be produced
    #[error("Parser error: {0}")]
    Parser(String),

    /// Model API answered with a failure
    #[error("Model API error: {0}")]
    Api(ApiError),

    /// Request could not be sent or its body read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a structural error.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    /// Create an unsupported behaviour error for a method name.
    pub fn unsupported_behaviour(method: impl Into<String>) -> Self {
        Self::UnsupportedBehaviour {
            method: method.into(),
        }
    }

    /// The API error payload, if this is an API failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}
