//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Application settings
    #[serde(default)]
    pub app: RawAppConfig,

    /// Provider overrides
    #[serde(default)]
    pub providers: RawProviders,
}

/// Application-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAppConfig {
    /// Data directory for the database
    pub data_dir: Option<PathBuf>,

    /// Number of history records listed by default
    pub history_limit: Option<usize>,
}

/// Per-provider overrides. Omitted sections keep the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawProviders {
    pub groq: Option<RawTextProvider>,
    pub gemini: Option<RawTextProvider>,
    pub openrouter: Option<RawTextProvider>,
    pub bytez: Option<RawImageProvider>,
}

/// Overrides for a text provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTextProvider {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Overrides for the image provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawImageProvider {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
