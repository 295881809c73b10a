//! Provider traits

use async_trait::async_trait;
use postforge_api::ProviderId;
use thiserror::Error;

/// Errors from a single provider call
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Network failure or timeout
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the provider's contract
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// A provider that turns a prompt into text
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Which provider this is; selects the credential used for the call
    fn id(&self) -> ProviderId;

    /// Run one completion. No retries.
    async fn complete(&self, api_key: &str, prompt: &str) -> ProviderResult<String>;
}

/// A provider that turns a prompt into an image
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Run one generation and return the decoded response body.
    ///
    /// The image URL is located by the caller, since the response layout is
    /// not guaranteed.
    async fn generate(&self, api_key: &str, prompt: &str) -> ProviderResult<serde_json::Value>;
}
