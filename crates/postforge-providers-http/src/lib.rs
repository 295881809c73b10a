//! HTTP providers for postforge
//!
//! This crate provides:
//! - OpenAI-style chat completions (Groq, OpenRouter)
//! - Gemini `generateContent`
//! - Bytez image generation
//! - Construction of the text fallback chain from settings

mod bytez;
mod chat;
mod gemini;
mod http;

pub use bytez::*;
pub use chat::*;
pub use gemini::*;

use postforge_api::ProviderSettings;
use postforge_provider_api::{ProviderResult, TextProvider};
use std::sync::Arc;

/// Build the text providers in fallback order: Groq, then Gemini, then OpenRouter
pub fn text_provider_chain(settings: &ProviderSettings) -> ProviderResult<Vec<Arc<dyn TextProvider>>> {
    let groq: Arc<dyn TextProvider> =
        Arc::new(ChatCompletionsProvider::groq(settings.groq.clone())?);
    let gemini: Arc<dyn TextProvider> = Arc::new(GeminiProvider::new(settings.gemini.clone())?);
    let openrouter: Arc<dyn TextProvider> =
        Arc::new(ChatCompletionsProvider::openrouter(settings.openrouter.clone())?);

    Ok(vec![groq, gemini, openrouter])
}
