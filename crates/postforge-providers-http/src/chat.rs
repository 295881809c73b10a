//! OpenAI-style chat completions providers (Groq, OpenRouter)

use async_trait::async_trait;
use postforge_api::{ProviderId, TextModelSettings};
use postforge_provider_api::{ProviderError, ProviderResult, TextProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{build_client, send_json};

/// System message sent ahead of every user prompt
pub const SYSTEM_PROMPT: &str = "You are a professional social media content creator.";

/// Provider speaking the `/chat/completions` format with bearer auth
pub struct ChatCompletionsProvider {
    id: ProviderId,
    client: Client,
    settings: TextModelSettings,
}

impl ChatCompletionsProvider {
    pub fn new(id: ProviderId, settings: TextModelSettings) -> ProviderResult<Self> {
        let client = build_client(settings.timeout)?;
        Ok(Self {
            id,
            client,
            settings,
        })
    }

    pub fn groq(settings: TextModelSettings) -> ProviderResult<Self> {
        Self::new(ProviderId::Groq, settings)
    }

    pub fn openrouter(settings: TextModelSettings) -> ProviderResult<Self> {
        Self::new(ProviderId::OpenRouter, settings)
    }
}

#[async_trait]
impl TextProvider for ChatCompletionsProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> ProviderResult<String> {
        let body = ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        debug!(provider = %self.id, endpoint = %self.settings.endpoint, "Sending chat completion");

        let request = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .json(&body);

        let response: ChatCompletionResponse = send_json(self.id, request).await?;
        response.into_content()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_content(self) -> ProviderResult<String> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".into()))?;

        choice
            .message
            .content
            .map(|c| c.trim().to_string())
            .ok_or_else(|| ProviderError::InvalidResponse("Choice has no content".into()))
    }
}
