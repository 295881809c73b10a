//! Store trait definitions

use postforge_api::{Credentials, HistoryRecord, ProviderId};
use std::collections::BTreeMap;

use crate::StoreResult;

/// Main store trait
pub trait Store: Send + Sync {
    // Credentials

    /// Upsert every non-empty key. Empty values neither create nor clear a key.
    fn save_credentials(&self, keys: &BTreeMap<ProviderId, String>) -> StoreResult<()>;

    /// All stored keys
    fn get_credentials(&self) -> StoreResult<Credentials>;

    // History

    /// Append a generation result
    fn append_history(
        &self,
        prompt: &str,
        content: &str,
        platform: &str,
        tone: &str,
    ) -> StoreResult<HistoryRecord>;

    /// Most recent records first
    fn get_history(&self, limit: usize) -> StoreResult<Vec<HistoryRecord>>;

    /// Delete every history record, returning how many were removed
    fn clear_history(&self) -> StoreResult<usize>;

    // Health

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
