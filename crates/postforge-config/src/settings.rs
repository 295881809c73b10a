//! Validated settings structures

use crate::schema::{RawAppConfig, RawConfig, RawImageProvider, RawTextProvider};
use postforge_api::{
    DEFAULT_HISTORY_LIMIT, ImageModelSettings, ProviderSettings, TextModelSettings,
};
use std::path::PathBuf;
use std::time::Duration;

/// Validated settings ready for use by the client and the front end
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub app: AppConfig,
    pub providers: ProviderSettings,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let defaults = ProviderSettings::default();
        let providers = ProviderSettings {
            groq: merge_text(defaults.groq, raw.providers.groq),
            gemini: merge_text(defaults.gemini, raw.providers.gemini),
            openrouter: merge_text(defaults.openrouter, raw.providers.openrouter),
            bytez: merge_image(defaults.bytez, raw.providers.bytez),
        };

        Self {
            app: AppConfig::from_raw(raw.app),
            providers,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Data directory from the config file. None means use the default location.
    pub data_dir: Option<PathBuf>,
    pub history_limit: usize,
}

impl AppConfig {
    fn from_raw(raw: RawAppConfig) -> Self {
        Self {
            data_dir: raw.data_dir,
            history_limit: raw.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn merge_text(base: TextModelSettings, raw: Option<RawTextProvider>) -> TextModelSettings {
    let Some(raw) = raw else {
        return base;
    };

    TextModelSettings {
        endpoint: raw.endpoint.unwrap_or(base.endpoint),
        model: raw.model.unwrap_or(base.model),
        timeout: raw
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(base.timeout),
        temperature: raw.temperature.unwrap_or(base.temperature),
        max_tokens: raw.max_tokens.unwrap_or(base.max_tokens),
    }
}

fn merge_image(base: ImageModelSettings, raw: Option<RawImageProvider>) -> ImageModelSettings {
    let Some(raw) = raw else {
        return base;
    };

    ImageModelSettings {
        endpoint: raw.endpoint.unwrap_or(base.endpoint),
        model: raw.model.unwrap_or(base.model),
        timeout: raw
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(base.timeout),
        width: raw.width.unwrap_or(base.width),
        height: raw.height.unwrap_or(base.height),
    }
}
