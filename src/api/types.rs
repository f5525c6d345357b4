//! Payloads of the model API.

use serde::{Deserialize, Serialize};

/// One field-level validation failure reported by the model API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

/// Error body returned by the model API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Error synthesised from a bare HTTP status when the body carries none.
    pub fn from_status(status: u16, reason: Option<&str>) -> Self {
        let message = match status {
            403 => "Access denied!".to_string(),
            _ => reason.map(str::to_string).unwrap_or_else(|| status.to_string()),
        };
        Self::new(status.to_string(), message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "{} - {}", self.code, self.message);
        }
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{} - {}", e.name, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}
