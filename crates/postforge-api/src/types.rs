//! Shared types for the postforge API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a label does not name a known provider, platform, or tone
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLabelError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unknown tone: {0}")]
    UnknownTone(String),
}

/// Third-party generation provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
    Groq,
    OpenRouter,
    Bytez,
}

impl ProviderId {
    /// Every known provider, in settings-screen order
    pub const ALL: [ProviderId; 4] = [
        ProviderId::Gemini,
        ProviderId::Groq,
        ProviderId::OpenRouter,
        ProviderId::Bytez,
    ];

    /// Stable identifier used in the credential table
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::Groq => "groq",
            ProviderId::OpenRouter => "openrouter",
            ProviderId::Bytez => "bytez",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "Gemini",
            ProviderId::Groq => "Groq",
            ProviderId::OpenRouter => "OpenRouter",
            ProviderId::Bytez => "Bytez",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderId::Gemini),
            "groq" => Ok(ProviderId::Groq),
            "openrouter" => Ok(ProviderId::OpenRouter),
            "bytez" => Ok(ProviderId::Bytez),
            _ => Err(ParseLabelError::UnknownProvider(s.to_string())),
        }
    }
}

/// Target social platform for generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    Twitter,
    LinkedIn,
    Instagram,
    Facebook,
    #[default]
    General,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::Instagram,
        Platform::Facebook,
        Platform::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::General => "General",
        }
    }

    /// Lenient lookup: unknown labels fall back to `General`
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError::UnknownPlatform(s.to_string()))
    }
}

/// Writing tone for generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Professional,
    Casual,
    Enthusiastic,
    Formal,
    Funny,
    Inspirational,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Enthusiastic,
        Tone::Formal,
        Tone::Funny,
        Tone::Inspirational,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Formal => "Formal",
            Tone::Funny => "Funny",
            Tone::Inspirational => "Inspirational",
        }
    }

    /// Lenient lookup: unknown labels mean "no tone"
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError::UnknownTone(s.to_string()))
    }
}

/// Provider API keys as currently stored.
///
/// An absent or empty key means the provider is not configured.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    keys: BTreeMap<ProviderId, String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, provider: ProviderId, key: impl Into<String>) {
        self.keys.insert(provider, key.into());
    }

    /// Key for a provider, if one is configured
    pub fn get(&self, provider: ProviderId) -> Option<&str> {
        self.keys
            .get(&provider)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }

    /// Providers with a non-empty key
    pub fn configured(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.keys
            .iter()
            .filter(|(_, k)| !k.is_empty())
            .map(|(p, _)| *p)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<(ProviderId, String)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (ProviderId, String)>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material
        f.debug_set().entries(self.configured()).finish()
    }
}

/// Mask a key for display, keeping only the last four characters
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(8), tail)
}

/// One persisted generation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub prompt: String,
    pub content: String,
    pub platform: String,
    pub tone: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Content shortened for listings
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}
