//! Configuration validation

use crate::schema::{RawConfig, RawImageProvider, RawTextProvider};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Provider '{provider}': {message}")]
    ProviderError { provider: String, message: String },

    #[error("Invalid endpoint '{value}' for provider '{provider}': must start with http:// or https://")]
    InvalidEndpoint { provider: String, value: String },

    #[error("App config error: {0}")]
    AppError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.app.history_limit == Some(0) {
        errors.push(ValidationError::AppError(
            "history_limit must be greater than 0".into(),
        ));
    }

    let text_providers = [
        ("groq", &config.providers.groq),
        ("gemini", &config.providers.gemini),
        ("openrouter", &config.providers.openrouter),
    ];
    for (name, provider) in text_providers {
        if let Some(provider) = provider {
            errors.extend(validate_text_provider(name, provider));
        }
    }

    if let Some(bytez) = &config.providers.bytez {
        errors.extend(validate_image_provider("bytez", bytez));
    }

    errors
}

fn validate_text_provider(name: &str, raw: &RawTextProvider) -> Vec<ValidationError> {
    let mut errors = validate_common(
        name,
        raw.endpoint.as_deref(),
        raw.model.as_deref(),
        raw.timeout_seconds,
    );

    if let Some(temperature) = raw.temperature
        && !(0.0..=2.0).contains(&temperature)
    {
        errors.push(provider_error(name, "temperature must be between 0.0 and 2.0"));
    }

    if raw.max_tokens == Some(0) {
        errors.push(provider_error(name, "max_tokens must be greater than 0"));
    }

    errors
}

fn validate_image_provider(name: &str, raw: &RawImageProvider) -> Vec<ValidationError> {
    let mut errors = validate_common(
        name,
        raw.endpoint.as_deref(),
        raw.model.as_deref(),
        raw.timeout_seconds,
    );

    if raw.width == Some(0) {
        errors.push(provider_error(name, "width must be greater than 0"));
    }
    if raw.height == Some(0) {
        errors.push(provider_error(name, "height must be greater than 0"));
    }

    errors
}

fn validate_common(
    name: &str,
    endpoint: Option<&str>,
    model: Option<&str>,
    timeout_seconds: Option<u64>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(endpoint) = endpoint
        && !is_http_url(endpoint)
    {
        errors.push(ValidationError::InvalidEndpoint {
            provider: name.to_string(),
            value: endpoint.to_string(),
        });
    }

    if let Some(model) = model
        && model.trim().is_empty()
    {
        errors.push(provider_error(name, "model cannot be empty"));
    }

    if timeout_seconds == Some(0) {
        errors.push(provider_error(name, "timeout_seconds must be greater than 0"));
    }

    errors
}

fn provider_error(name: &str, message: &str) -> ValidationError {
    ValidationError::ProviderError {
        provider: name.to_string(),
        message: message.to_string(),
    }
}

/// Check for an http(s) URL scheme
pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawAppConfig, RawProviders};

    fn config_with(providers: RawProviders) -> RawConfig {
        RawConfig {
            config_version: 1,
            app: RawAppConfig::default(),
            providers,
        }
    }

    #[test]
    fn empty_overrides_are_valid() {
        let config = config_with(RawProviders {
            groq: Some(RawTextProvider::default()),
            bytez: Some(RawImageProvider::default()),
            ..Default::default()
        });
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn zero_limits_rejected() {
        let config = config_with(RawProviders {
            openrouter: Some(RawTextProvider {
                timeout_seconds: Some(0),
                max_tokens: Some(0),
                ..Default::default()
            }),
            bytez: Some(RawImageProvider {
                width: Some(0),
                height: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        });

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn blank_model_rejected() {
        let config = config_with(RawProviders {
            gemini: Some(RawTextProvider {
                model: Some("  ".into()),
                ..Default::default()
            }),
            ..Default::default()
        });

        let errors = validate_config(&config);
        assert!(matches!(
            &errors[..],
            [ValidationError::ProviderError { provider, .. }] if provider == "gemini"
        ));
    }

    #[test]
    fn endpoint_scheme_checked() {
        assert!(is_http_url("http://127.0.0.1:8080/v1"));
        assert!(is_http_url("https://api.groq.com"));
        assert!(!is_http_url("api.groq.com"));
    }
}
