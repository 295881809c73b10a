//! Worker dispatch
//!
//! Each submitted job runs on its own tokio task. The finished result is
//! sent back over an unbounded channel as a [`Completion`], so the owning
//! context never blocks on a provider call.

use postforge_api::{HistoryRecord, Platform, Tone};
use postforge_store::{Store, StoreResult};
use postforge_util::RequestId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{GenerateResult, GenerationClient};

/// Platform label recorded in history for image jobs
pub const IMAGE_HISTORY_PLATFORM: &str = "Image";

/// A unit of generation work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationJob {
    Text {
        prompt: String,
        platform: Platform,
        tone: Option<Tone>,
    },
    Image {
        prompt: String,
    },
}

impl GenerationJob {
    pub fn prompt(&self) -> &str {
        match self {
            GenerationJob::Text { prompt, .. } | GenerationJob::Image { prompt } => prompt,
        }
    }

    /// Platform and tone labels stored alongside the result
    pub fn history_tags(&self) -> (&'static str, &'static str) {
        match self {
            GenerationJob::Text { platform, tone, .. } => {
                (platform.label(), tone.map(|t| t.label()).unwrap_or(""))
            }
            GenerationJob::Image { .. } => (IMAGE_HISTORY_PLATFORM, ""),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            GenerationJob::Text { .. } => "text",
            GenerationJob::Image { .. } => "image",
        }
    }
}

/// Result of one job, handed back to the submitter
#[derive(Debug)]
pub struct Completion {
    pub request_id: RequestId,
    pub job: GenerationJob,
    /// Generated text, or the image URL
    pub outcome: GenerateResult<String>,
}

impl Completion {
    /// Append a successful outcome to history. Failures are not recorded.
    pub fn record(&self, store: &dyn Store) -> StoreResult<Option<HistoryRecord>> {
        let Ok(content) = &self.outcome else {
            return Ok(None);
        };
        let (platform, tone) = self.job.history_tags();
        store
            .append_history(self.job.prompt(), content, platform, tone)
            .map(Some)
    }
}

/// Runs generation jobs off the caller's task
pub struct GenerationWorker {
    client: Arc<GenerationClient>,
    completion_tx: mpsc::UnboundedSender<Completion>,
}

impl GenerationWorker {
    /// Create a worker and the receiver its completions arrive on
    pub fn new(client: Arc<GenerationClient>) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        (
            Self {
                client,
                completion_tx,
            },
            completion_rx,
        )
    }

    /// Spawn a task for `job`. Must be called within a tokio runtime.
    pub fn submit(&self, job: GenerationJob) -> RequestId {
        let request_id = RequestId::new();
        let client = self.client.clone();
        let tx = self.completion_tx.clone();

        debug!(request_id = %request_id, kind = job.kind(), "Job submitted");

        tokio::spawn(async move {
            let outcome = match &job {
                GenerationJob::Text {
                    prompt,
                    platform,
                    tone,
                } => client.generate_text(prompt, *platform, *tone).await,
                GenerationJob::Image { prompt } => client.generate_image(prompt).await,
            };

            if let Err(e) = &outcome {
                warn!(request_id = %request_id, error = %e, "Job failed");
            }

            let completion = Completion {
                request_id,
                job,
                outcome,
            };
            if tx.send(completion).is_err() {
                debug!(request_id = %request_id, "Completion receiver dropped");
            }
        });

        request_id
    }
}
