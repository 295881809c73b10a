//! Default paths for postforge
//!
//! Paths are user-writable by default:
//! - Config: `$XDG_CONFIG_HOME/postforge/config.toml` or `~/.config/postforge/config.toml`
//! - Data: `$XDG_DATA_HOME/postforge` or `~/.local/share/postforge`

use std::path::{Path, PathBuf};

/// Environment variable for overriding the data directory
pub const POSTFORGE_DATA_DIR_ENV: &str = "POSTFORGE_DATA_DIR";

/// Database filename within the data directory
pub const DATABASE_FILENAME: &str = "postforge.db";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Application subdirectory name
const APP_DIR: &str = "postforge";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/postforge/config.toml` (if XDG_CONFIG_HOME is set)
/// 2. `~/.config/postforge/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/tmp").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default data directory, ignoring POSTFORGE_DATA_DIR.
///
/// The front end reads the env var itself, ahead of the config file.
///
/// Order of precedence:
/// 1. `$XDG_DATA_HOME/postforge` (if XDG_DATA_HOME is set)
/// 2. `~/.local/share/postforge` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Database path inside a data directory
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_contains_postforge() {
        let path = default_config_path();
        assert!(path.to_string_lossy().contains("postforge"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn data_dir_contains_postforge() {
        let path = default_data_dir();
        assert!(path.to_string_lossy().contains("postforge"));
    }

    #[test]
    fn database_lives_in_data_dir() {
        let dir = PathBuf::from("/var/lib/postforge");
        assert_eq!(database_path(&dir), dir.join("postforge.db"));
    }
}
