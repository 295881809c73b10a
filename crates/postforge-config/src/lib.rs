//! Configuration parsing and validation for postforge
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Application settings (data directory, history listing size)
//! - Per-provider endpoint, model, timeout, and sampling overrides
//! - Validation with clear error messages

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration if the file exists, otherwise use built-in defaults
pub fn load_config_or_default(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        debug!(path = %path.display(), "No config file, using defaults");
        Ok(Settings::default())
    }
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let settings = parse_config("config_version = 1").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn provider_overrides_apply() {
        let config = r#"
            config_version = 1

            [app]
            data_dir = "/srv/postforge"
            history_limit = 20

            [providers.groq]
            model = "llama-3.1-8b-instant"
            timeout_seconds = 10

            [providers.bytez]
            endpoint = "http://localhost:9000/image"
            width = 512
        "#;

        let settings = parse_config(config).unwrap();
        assert_eq!(settings.app.data_dir.as_deref(), Some(Path::new("/srv/postforge")));
        assert_eq!(settings.app.history_limit, 20);
        assert_eq!(settings.providers.groq.model, "llama-3.1-8b-instant");
        assert_eq!(settings.providers.groq.timeout, Duration::from_secs(10));
        // Untouched fields keep their defaults
        assert_eq!(settings.providers.groq.max_tokens, 500);
        assert_eq!(settings.providers.bytez.endpoint, "http://localhost:9000/image");
        assert_eq!(settings.providers.bytez.width, 512);
        assert_eq!(settings.providers.bytez.height, 1024);
    }

    #[test]
    fn validation_reports_every_error() {
        let config = r#"
            config_version = 1

            [app]
            history_limit = 0

            [providers.gemini]
            endpoint = "ftp://example.com"
            temperature = 3.5
        "#;

        match parse_config(config) {
            Err(ConfigError::ValidationFailed { errors }) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_version = 1\n[app]\nhistory_limit = 5\n").unwrap();

        let settings = load_config(&path).unwrap();
        assert_eq!(settings.app.history_limit, 5);
    }
}
