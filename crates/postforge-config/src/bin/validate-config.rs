//! Config validation CLI tool
//!
//! Validates a postforge configuration file and reports any errors.

use postforge_config::{ConfigError, CURRENT_CONFIG_VERSION};
use postforge_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

/// Path to check: the argument, or the default config path when none is given.
/// `None` means help was requested.
fn config_path_from_arg(arg: Option<&str>) -> Option<PathBuf> {
    match arg {
        Some("-h" | "--help") => None,
        Some(path) => Some(PathBuf::from(path)),
        None => Some(default_config_path()),
    }
}

fn main() -> ExitCode {
    let arg = std::env::args().nth(1);

    let Some(config_path) = config_path_from_arg(arg.as_deref()) else {
        eprintln!("Usage: validate-config [config-file]");
        eprintln!();
        eprintln!("Validates a postforge configuration file.");
        eprintln!("Without a path, checks {}", default_config_path().display());
        return ExitCode::from(2);
    };

    println!("Checking {}", config_path.display());

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match postforge_config::load_config(&config_path) {
        Ok(settings) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", CURRENT_CONFIG_VERSION);
            match &settings.app.data_dir {
                Some(dir) => println!("  Data directory: {}", dir.display()),
                None => println!("  Data directory: (default)"),
            }
            println!("  History limit: {}", settings.app.history_limit);
            println!();
            println!("Text providers (fallback order):");
            let providers = &settings.providers;
            for (name, text) in [
                ("groq", &providers.groq),
                ("gemini", &providers.gemini),
                ("openrouter", &providers.openrouter),
            ] {
                println!(
                    "  - {} [{}] {} (timeout {}s)",
                    name,
                    text.model,
                    text.endpoint,
                    text.timeout.as_secs()
                );
            }
            println!();
            println!("Image provider:");
            println!(
                "  - bytez [{}] {} ({}x{}, timeout {}s)",
                providers.bytez.model,
                providers.bytez.endpoint,
                providers.bytez.width,
                providers.bytez.height,
                providers.bytez.timeout.as_secs()
            );

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {}", config_path.display());
            report_error(&e);
            ExitCode::from(1)
        }
    }
}

fn report_error(error: &ConfigError) {
    match error {
        ConfigError::ValidationFailed { errors } => {
            eprintln!("{} problem(s) found:", errors.len());
            for err in errors {
                eprintln!("  - {}", err);
            }
        }
        ConfigError::UnsupportedVersion(found) => {
            eprintln!(
                "config_version = {} is not supported; this build reads version {}",
                found, CURRENT_CONFIG_VERSION
            );
        }
        other => eprintln!("{}", other),
    }
}
