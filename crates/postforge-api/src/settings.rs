//! Per-provider request settings and their built-in defaults

use std::time::Duration;

use crate::ProviderId;

/// Request settings for a chat-style text provider
#[derive(Debug, Clone, PartialEq)]
pub struct TextModelSettings {
    /// Endpoint URL. For Gemini this is the API base; the model path is appended.
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl TextModelSettings {
    pub fn groq() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1/chat/completions".into(),
            model: "llama-3.3-70b-versatile".into(),
            ..Self::base()
        }
    }

    pub fn gemini() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-1.5-flash".into(),
            ..Self::base()
        }
    }

    pub fn openrouter() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".into(),
            model: "google/gemini-2.0-flash-exp:free".into(),
            ..Self::base()
        }
    }

    /// Defaults for a text provider; `None` for providers that do not generate text
    pub fn defaults_for(provider: ProviderId) -> Option<Self> {
        match provider {
            ProviderId::Groq => Some(Self::groq()),
            ProviderId::Gemini => Some(Self::gemini()),
            ProviderId::OpenRouter => Some(Self::openrouter()),
            ProviderId::Bytez => None,
        }
    }

    fn base() -> Self {
        Self {
            endpoint: String::new(),
            model: String::new(),
            timeout: DEFAULT_TEXT_TIMEOUT,
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Request settings for the image provider
#[derive(Debug, Clone, PartialEq)]
pub struct ImageModelSettings {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
    pub width: u32,
    pub height: u32,
}

impl ImageModelSettings {
    pub fn bytez() -> Self {
        Self {
            endpoint: "https://api.bytez.com/v1/image/generate".into(),
            model: "flux-schnell".into(),
            timeout: DEFAULT_IMAGE_TIMEOUT,
            width: 1024,
            height: 1024,
        }
    }
}

impl Default for ImageModelSettings {
    fn default() -> Self {
        Self::bytez()
    }
}

/// Settings for every provider the client knows about
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub groq: TextModelSettings,
    pub gemini: TextModelSettings,
    pub openrouter: TextModelSettings,
    pub bytez: ImageModelSettings,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            groq: TextModelSettings::groq(),
            gemini: TextModelSettings::gemini(),
            openrouter: TextModelSettings::openrouter(),
            bytez: ImageModelSettings::bytez(),
        }
    }
}

/// Timeout for a single text provider call
pub const DEFAULT_TEXT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for a single image provider call
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of history records returned by a listing
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
