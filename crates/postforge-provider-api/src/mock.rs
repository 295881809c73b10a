//! Mock providers for testing

use async_trait::async_trait;
use postforge_api::ProviderId;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{ImageProvider, ProviderError, ProviderResult, TextProvider};

/// One recorded call to a mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub api_key: String,
    pub prompt: String,
}

/// Mock text provider for unit/integration testing
#[derive(Clone)]
pub struct MockTextProvider {
    id: ProviderId,
    outcome: Arc<Mutex<ProviderResult<String>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockTextProvider {
    /// A provider that answers every prompt with `content`
    pub fn succeeding(id: ProviderId, content: impl Into<String>) -> Self {
        Self::with_outcome(id, Ok(content.into()))
    }

    /// A provider that fails every call with `error`
    pub fn failing(id: ProviderId, error: ProviderError) -> Self {
        Self::with_outcome(id, Err(error))
    }

    fn with_outcome(id: ProviderId, outcome: ProviderResult<String>) -> Self {
        Self {
            id,
            outcome: Arc::new(Mutex::new(outcome)),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Arc::new(Mutex::new(None)),
        }
    }

    /// Change what subsequent calls return
    pub fn set_outcome(&self, outcome: ProviderResult<String>) {
        *self.outcome.lock().unwrap() = outcome;
    }

    /// Simulate latency before answering
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> ProviderResult<String> {
        self.calls.lock().unwrap().push(MockCall {
            api_key: api_key.to_string(),
            prompt: prompt.to_string(),
        });

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.outcome.lock().unwrap().clone()
    }
}

/// Mock image provider for unit/integration testing
#[derive(Clone)]
pub struct MockImageProvider {
    id: ProviderId,
    outcome: Arc<Mutex<ProviderResult<serde_json::Value>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockImageProvider {
    /// A provider that returns `body` as the decoded response
    pub fn responding(body: serde_json::Value) -> Self {
        Self::with_outcome(Ok(body))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: ProviderResult<serde_json::Value>) -> Self {
        Self {
            id: ProviderId::Bytez,
            outcome: Arc::new(Mutex::new(outcome)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_outcome(&self, outcome: ProviderResult<serde_json::Value>) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> ProviderResult<serde_json::Value> {
        self.calls.lock().unwrap().push(MockCall {
            api_key: api_key.to_string(),
            prompt: prompt.to_string(),
        });
        self.outcome.lock().unwrap().clone()
    }
}
