//! Google Gemini `generateContent` provider

use async_trait::async_trait;
use postforge_api::{ProviderId, TextModelSettings};
use postforge_provider_api::{ProviderError, ProviderResult, TextProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{build_client, send_json};

/// Gemini provider. The key travels as a `key` query parameter.
pub struct GeminiProvider {
    client: Client,
    settings: TextModelSettings,
}

impl GeminiProvider {
    pub fn new(settings: TextModelSettings) -> ProviderResult<Self> {
        let client = build_client(settings.timeout)?;
        Ok(Self { client, settings })
    }

    /// Full method URL, without the key
    fn method_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> ProviderResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_tokens,
            },
        };

        let url = self.method_url();
        debug!(provider = "gemini", url = %url, "Sending generateContent");

        let request = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body);

        let response: GenerateContentResponse = send_json(ProviderId::Gemini, request).await?;
        response.into_text()
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> ProviderResult<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .ok_or_else(|| ProviderError::InvalidResponse("No candidate text in response".into()))
    }
}
