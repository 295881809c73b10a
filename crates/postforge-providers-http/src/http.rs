//! Shared request plumbing

use postforge_api::ProviderId;
use postforge_provider_api::{ProviderError, ProviderResult};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Build a client with a per-request timeout
pub(crate) fn build_client(timeout: Duration) -> ProviderResult<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Client(e.to_string()))
}

/// Send a prepared request and decode a JSON response.
///
/// Non-success statuses become `ProviderError::Status` with the body text.
pub(crate) async fn send_json<R: DeserializeOwned>(
    provider: ProviderId,
    request: RequestBuilder,
) -> ProviderResult<R> {
    let response = request.send().await.map_err(request_error)?;

    let status = response.status();
    let body = response.text().await.map_err(request_error)?;

    debug!(provider = %provider, status = %status, "Provider response received");

    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Drop the URL from the error text; Gemini carries the key in its query string
fn request_error(e: reqwest::Error) -> ProviderError {
    let e = e.without_url();
    if e.is_timeout() {
        ProviderError::Request(format!("timed out: {}", e))
    } else {
        ProviderError::Request(e.to_string())
    }
}
