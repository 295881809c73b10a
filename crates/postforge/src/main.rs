//! postforge - AI content and image generation from the command line

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use postforge::{API_KEY_HINT, App, CommandError, resolve_data_dir};
use postforge_api::{Platform, ProviderId, Tone};
use postforge_core::GenerationJob;
use postforge_util::{POSTFORGE_DATA_DIR_ENV, default_config_path};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// postforge - Generate social media posts and images with hosted AI providers
#[derive(Parser, Debug)]
#[command(name = "postforge")]
#[command(about = "Generate social media posts and images with hosted AI providers", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/postforge/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set POSTFORGE_DATA_DIR env var)
    #[arg(short, long, env = POSTFORGE_DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage provider API keys
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// Generate a post for a platform
    Text {
        prompt: String,

        /// Twitter, LinkedIn, Instagram, Facebook or General
        #[arg(short, long, default_value_t = Platform::General)]
        platform: Platform,

        /// Professional, Casual, Enthusiastic, Formal, Funny or Inspirational
        #[arg(short, long)]
        tone: Option<Tone>,
    },

    /// Generate an image and print its URL
    Image { prompt: String },

    /// Show or clear generation history
    History {
        /// Number of records to show (default from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Subcommand, Debug)]
enum KeysAction {
    /// Save keys; omitted or empty keys are left unchanged
    Set(KeyArgs),
    /// Show which providers are configured
    List,
}

#[derive(ClapArgs, Debug)]
struct KeyArgs {
    #[arg(long)]
    gemini: Option<String>,
    #[arg(long)]
    groq: Option<String>,
    #[arg(long)]
    openrouter: Option<String>,
    #[arg(long)]
    bytez: Option<String>,
}

impl KeyArgs {
    fn into_map(self) -> BTreeMap<ProviderId, String> {
        [
            (ProviderId::Gemini, self.gemini),
            (ProviderId::Groq, self.groq),
            (ProviderId::OpenRouter, self.openrouter),
            (ProviderId::Bytez, self.bytez),
        ]
        .into_iter()
        .filter_map(|(provider, key)| key.map(|k| (provider, k)))
        .collect()
    }
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// Delete every history record
    Clear,
}

async fn run(args: Args) -> Result<()> {
    let settings = postforge_config::load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    let data_dir = resolve_data_dir(args.data_dir.as_deref(), &settings);
    let mut app = App::from_settings(&settings, &data_dir)?;

    info!(
        config_path = %args.config.display(),
        data_dir = %data_dir.display(),
        "Configuration loaded"
    );

    match args.command {
        Command::Keys {
            action: KeysAction::Set(keys),
        } => {
            let saved = app.set_keys(keys.into_map())?;
            println!("Saved {} API key(s).", saved);
        }
        Command::Keys {
            action: KeysAction::List,
        } => app.list_keys(&mut std::io::stdout())?,
        Command::Text {
            prompt,
            platform,
            tone,
        } => {
            let content = app
                .generate(GenerationJob::Text {
                    prompt,
                    platform,
                    tone,
                })
                .await?;
            println!("{}", content);
        }
        Command::Image { prompt } => {
            let url = app.generate(GenerationJob::Image { prompt }).await?;
            println!("{}", url);
        }
        Command::History {
            action: Some(HistoryAction::Clear),
            ..
        } => {
            let removed = app.clear_history()?;
            println!("Cleared {} history record(s).", removed);
        }
        Command::History { limit, action: None } => {
            app.list_history(limit, &mut std::io::stdout())?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "postforge starting");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if e
                .downcast_ref::<CommandError>()
                .is_some_and(CommandError::is_generation_failure)
            {
                eprintln!("{}", API_KEY_HINT);
            }
            ExitCode::from(1)
        }
    }
}
