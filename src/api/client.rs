//! Model API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use super::types::ApiError;
use crate::error::{Error, Result};
use crate::reconcile::PatchDocument;

/// Remote store of model definitions.
///
/// Paths are absolute API paths such as
/// `/api/v1/{tenant}/{environment}/model/StateMachine/{name}`.
#[async_trait]
pub trait ModelApi: Send + Sync {
    /// Fetch the current document at `path`.
    async fn get(&self, path: &str) -> Result<Value>;

    /// Apply a JSON Patch to the document at `path`.
    async fn patch(&self, path: &str, patch: &PatchDocument) -> Result<()>;
}

/// Configuration for [`HttpModelApi`].
#[derive(Debug, Clone)]
pub struct ModelApiConfig {
    /// Base URL of the model API, without trailing slash.
    pub base_url: Option<String>,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ModelApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: 30,
        }
    }
}

impl ModelApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("BEHAVIOUR_SYNC_API_URL").ok(),
            token: std::env::var("BEHAVIOUR_SYNC_TOKEN").ok(),
            timeout_secs: std::env::var("BEHAVIOUR_SYNC_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// [`ModelApi`] over HTTP.
pub struct HttpModelApi {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl HttpModelApi {
    pub fn new(config: ModelApiConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .ok_or_else(|| Error::Config("model API base URL is not set".to_string()))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: config.token,
            http,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ModelApiConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Read the body, turning a non-success status into [`Error::Api`].
    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error = serde_json::from_str::<ApiError>(&body)
                .ok()
                .filter(|e| !e.message.is_empty() || !e.errors.is_empty())
                .unwrap_or_else(|| ApiError::from_status(status.as_u16(), status.canonical_reason()));
            return Err(Error::Api(error));
        }
        Ok(body)
    }
}

#[async_trait]
impl ModelApi for HttpModelApi {
    async fn get(&self, path: &str) -> Result<Value> {
        debug!(path, "GET model document");
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|e| Error::Transport(format!("HTTP request failed: {}", e)))?;

        let body = Self::read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn patch(&self, path: &str, patch: &PatchDocument) -> Result<()> {
        debug!(path, operations = patch.len(), "PATCH model document");
        let response = self
            .authorize(self.http.patch(self.url(path)))
            .json(patch)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("HTTP request failed: {}", e)))?;

        Self::read_body(response).await.map(|_| ())
    }
}
