//! Bytez image generation provider

use async_trait::async_trait;
use postforge_api::{ImageModelSettings, ProviderId};
use postforge_provider_api::{ImageProvider, ProviderResult};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::http::{build_client, send_json};

pub struct BytezProvider {
    client: Client,
    settings: ImageModelSettings,
}

impl BytezProvider {
    pub fn new(settings: ImageModelSettings) -> ProviderResult<Self> {
        let client = build_client(settings.timeout)?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl ImageProvider for BytezProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Bytez
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> ProviderResult<serde_json::Value> {
        let body = ImageRequest {
            prompt,
            model: &self.settings.model,
            width: self.settings.width,
            height: self.settings.height,
        };

        debug!(provider = "bytez", endpoint = %self.settings.endpoint, "Sending image request");

        let request = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .json(&body);

        send_json(ProviderId::Bytez, request).await
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    width: u32,
    height: u32,
}
