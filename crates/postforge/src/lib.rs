//! Command handlers for the postforge front end
//!
//! [`App`] owns the store and the generation worker. The binary parses
//! arguments and calls into it; tests drive it with mock providers.

use postforge_api::{HistoryRecord, ProviderId, mask_key};
use postforge_config::Settings;
use postforge_core::{Completion, GenerateError, GenerationClient, GenerationJob, GenerationWorker};
use postforge_provider_api::{ImageProvider, ProviderError};
use postforge_providers_http::{BytezProvider, text_provider_chain};
use postforge_store::{SqliteStore, Store, StoreError};
use postforge_util::{default_data_dir, database_path, format_timestamp_short};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Characters of content shown per history entry
pub const HISTORY_PREVIEW_CHARS: usize = 100;

/// Hint printed after a failed generation
pub const API_KEY_HINT: &str = "Please check your API keys in Settings.";

/// Errors from command handlers
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Please enter a prompt")]
    EmptyPrompt,

    #[error(transparent)]
    Generation(#[from] GenerateError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to set up providers: {0}")]
    Providers(#[from] ProviderError),

    #[error("Generation worker stopped")]
    WorkerStopped,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Whether the API key hint applies to this failure
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, CommandError::Generation(_))
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Data directory: explicit override, then config, then the XDG default
pub fn resolve_data_dir(override_dir: Option<&Path>, settings: &Settings) -> PathBuf {
    override_dir
        .map(Path::to_path_buf)
        .or_else(|| settings.app.data_dir.clone())
        .unwrap_or_else(default_data_dir)
}

/// The postforge front end
pub struct App {
    store: Arc<dyn Store>,
    worker: GenerationWorker,
    completions: mpsc::UnboundedReceiver<Completion>,
    history_limit: usize,
}

impl App {
    pub fn new(store: Arc<dyn Store>, client: GenerationClient, history_limit: usize) -> Self {
        let (worker, completions) = GenerationWorker::new(Arc::new(client));
        Self {
            store,
            worker,
            completions,
            history_limit,
        }
    }

    /// Wire the SQLite store and HTTP providers from settings
    pub fn from_settings(settings: &Settings, data_dir: &Path) -> CommandResult<Self> {
        let db_path = database_path(data_dir);
        let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&db_path)?);
        info!(db_path = %db_path.display(), "Store initialized");

        let text_providers = text_provider_chain(&settings.providers)?;
        let image_provider: Arc<dyn ImageProvider> =
            Arc::new(BytezProvider::new(settings.providers.bytez.clone())?);
        let client = GenerationClient::new(store.clone(), text_providers, image_provider);

        Ok(Self::new(store, client, settings.app.history_limit))
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Save every non-empty key; returns how many were given
    pub fn set_keys(&self, keys: BTreeMap<ProviderId, String>) -> CommandResult<usize> {
        let given = keys.values().filter(|k| !k.is_empty()).count();
        self.store.save_credentials(&keys)?;
        info!(count = given, "API keys saved");
        Ok(given)
    }

    /// One line per provider, keys masked
    pub fn list_keys(&self, out: &mut impl Write) -> CommandResult<()> {
        let credentials = self.store.get_credentials()?;
        for provider in ProviderId::ALL {
            let shown = credentials
                .get(provider)
                .map(mask_key)
                .unwrap_or_else(|| "(not set)".to_string());
            writeln!(out, "{:<12} {}", provider.display_name(), shown)?;
        }
        Ok(())
    }

    /// Run a job on the worker, wait for its completion, and record it.
    ///
    /// Returns the generated text or image URL.
    pub async fn generate(&mut self, job: GenerationJob) -> CommandResult<String> {
        if job.prompt().trim().is_empty() {
            return Err(CommandError::EmptyPrompt);
        }

        let request_id = self.worker.submit(job);

        while let Some(completion) = self.completions.recv().await {
            if completion.request_id != request_id {
                debug!(request_id = %completion.request_id, "Ignoring stale completion");
                continue;
            }

            match completion.record(self.store.as_ref()) {
                Ok(Some(record)) => debug!(record_id = record.id, "History recorded"),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Failed to record history"),
            }

            return completion.outcome.map_err(CommandError::from);
        }

        Err(CommandError::WorkerStopped)
    }

    /// Print the most recent records, newest first
    pub fn list_history(&self, limit: Option<usize>, out: &mut impl Write) -> CommandResult<usize> {
        let records = self.store.get_history(limit.unwrap_or(self.history_limit))?;
        if records.is_empty() {
            writeln!(out, "No history yet.")?;
            return Ok(0);
        }

        for record in &records {
            write_record(record, out)?;
        }
        Ok(records.len())
    }

    pub fn clear_history(&self) -> CommandResult<usize> {
        let removed = self.store.clear_history()?;
        info!(removed, "History cleared");
        Ok(removed)
    }
}

fn write_record(record: &HistoryRecord, out: &mut impl Write) -> io::Result<()> {
    let timestamp = format_timestamp_short(&record.created_at);
    let tags: Vec<&str> = [record.platform.as_str(), record.tone.as_str(), &timestamp]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    writeln!(out, "#{} {}", record.id, tags.join(" • "))?;
    writeln!(out, "  Prompt: {}", record.prompt)?;
    writeln!(out, "  {}", record.preview(HISTORY_PREVIEW_CHARS))?;
    writeln!(out)
}
