//! Generation client: credential lookup, text fallback chain, image generation

use postforge_api::{Credentials, Platform, ProviderId, Tone};
use postforge_provider_api::{ImageProvider, ProviderError, TextProvider};
use postforge_store::{Store, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{build_prompt, extract_image_url};

/// One failed provider call, kept for diagnostics
#[derive(Debug, Clone)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    pub error: ProviderError,
}

/// Errors surfaced to the caller of the generation client
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No text provider configured, or every configured one failed
    #[error("No API keys configured or all providers failed. Please add API keys in Settings.")]
    NoProviderSucceeded { attempts: Vec<ProviderAttempt> },

    /// A required provider has no key
    #[error("{} API key not configured", .0.display_name())]
    ProviderNotConfigured(ProviderId),

    /// A single-provider call failed
    #[error("{provider} failed: {source}")]
    Provider {
        provider: ProviderId,
        #[source]
        source: ProviderError,
    },

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Produces text and images from user prompts.
///
/// Credentials are read from the store on every call, so keys saved
/// elsewhere take effect on the next request.
pub struct GenerationClient {
    store: Arc<dyn Store>,
    text_providers: Vec<Arc<dyn TextProvider>>,
    image_provider: Arc<dyn ImageProvider>,
}

impl GenerationClient {
    /// `text_providers` is the fallback chain, tried in the given order
    pub fn new(
        store: Arc<dyn Store>,
        text_providers: Vec<Arc<dyn TextProvider>>,
        image_provider: Arc<dyn ImageProvider>,
    ) -> Self {
        debug!(
            chain = ?text_providers.iter().map(|p| p.id()).collect::<Vec<_>>(),
            image = %image_provider.id(),
            "Generation client initialized"
        );

        Self {
            store,
            text_providers,
            image_provider,
        }
    }

    /// Fallback order of the text chain
    pub fn text_chain(&self) -> Vec<ProviderId> {
        self.text_providers.iter().map(|p| p.id()).collect()
    }

    fn credentials(&self) -> GenerateResult<Credentials> {
        Ok(self.store.get_credentials()?)
    }

    /// Generate text for `prompt` targeted at a platform and tone.
    ///
    /// Each configured provider is tried once, in chain order. The first
    /// success is returned trimmed.
    pub async fn generate_text(
        &self,
        prompt: &str,
        platform: Platform,
        tone: Option<Tone>,
    ) -> GenerateResult<String> {
        let credentials = self.credentials()?;
        let enriched = build_prompt(prompt, platform, tone);

        let mut attempts = Vec::new();
        for provider in &self.text_providers {
            let id = provider.id();
            let Some(api_key) = credentials.get(id) else {
                debug!(provider = %id, "Skipping provider without key");
                continue;
            };

            match provider.complete(api_key, &enriched).await {
                Ok(content) => {
                    info!(
                        provider = %id,
                        failed_before = attempts.len(),
                        "Text generated"
                    );
                    return Ok(content.trim().to_string());
                }
                Err(error) => {
                    warn!(provider = %id, error = %error, "Provider failed, trying next");
                    attempts.push(ProviderAttempt {
                        provider: id,
                        error,
                    });
                }
            }
        }

        warn!(attempted = attempts.len(), "No text provider succeeded");
        Err(GenerateError::NoProviderSucceeded { attempts })
    }

    /// Generate an image and return its URL.
    ///
    /// Single provider, no fallback. A response without a recognizable URL
    /// yields the placeholder string rather than an error.
    pub async fn generate_image(&self, prompt: &str) -> GenerateResult<String> {
        let credentials = self.credentials()?;
        let id = self.image_provider.id();
        let api_key = credentials
            .get(id)
            .ok_or(GenerateError::ProviderNotConfigured(id))?;

        let body = self
            .image_provider
            .generate(api_key, prompt)
            .await
            .map_err(|source| GenerateError::Provider {
                provider: id,
                source,
            })?;

        let url = extract_image_url(&body);
        info!(provider = %id, "Image generated");
        Ok(url)
    }
}
