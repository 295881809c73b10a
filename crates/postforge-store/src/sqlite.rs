//! SQLite-based store implementation

use postforge_api::{Credentials, HistoryRecord, ProviderId};
use postforge_util::{format_timestamp, parse_timestamp};
use rusqlite::{params, Connection, TransactionBehavior};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{Store, StoreResult};

/// How long a connection waits on another writer's lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based store.
///
/// Holds only the database path. Every operation opens its own connection,
/// runs one transaction, and drops the connection, so concurrent callers are
/// serialized by SQLite's locking alone.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Use a store at the given path. The file and its parent directory are
    /// created on first access.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    fn connect(&self) -> StoreResult<Connection> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        init_schema(&conn)?;
        Ok(conn)
    }
}

fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        -- Provider credentials (one row per provider)
        CREATE TABLE IF NOT EXISTS api_keys (
            provider TEXT PRIMARY KEY,
            api_key TEXT NOT NULL
        );

        -- Generation history (append-only)
        CREATE TABLE IF NOT EXISTS content_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            prompt TEXT NOT NULL,
            content TEXT NOT NULL,
            platform TEXT,
            tone TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_history_created_at ON content_history(created_at);
        "#,
    )?;
    Ok(())
}

impl Store for SqliteStore {
    fn save_credentials(&self, keys: &BTreeMap<ProviderId, String>) -> StoreResult<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut saved = 0;
        for (provider, key) in keys {
            if key.is_empty() {
                continue;
            }
            tx.execute(
                r#"
                INSERT INTO api_keys (provider, api_key)
                VALUES (?, ?)
                ON CONFLICT(provider)
                DO UPDATE SET api_key = excluded.api_key
                "#,
                params![provider.as_str(), key],
            )?;
            saved += 1;
        }

        tx.commit()?;
        debug!(saved, "Credentials saved");
        Ok(())
    }

    fn get_credentials(&self) -> StoreResult<Credentials> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT provider, api_key FROM api_keys")?;

        let rows = stmt.query_map([], |row| {
            let provider: String = row.get(0)?;
            let key: String = row.get(1)?;
            Ok((provider, key))
        })?;

        let mut credentials = Credentials::new();
        for row in rows {
            let (provider, key) = row?;
            match provider.parse::<ProviderId>() {
                Ok(id) => credentials.insert(id, key),
                Err(_) => warn!(provider = %provider, "Ignoring key for unknown provider"),
            }
        }

        Ok(credentials)
    }

    fn append_history(
        &self,
        prompt: &str,
        content: &str,
        platform: &str,
        tone: &str,
    ) -> StoreResult<HistoryRecord> {
        let mut conn = self.connect()?;
        let created_at = postforge_util::now();

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO content_history (prompt, content, platform, tone, created_at) VALUES (?, ?, ?, ?, ?)",
            params![prompt, content, platform, tone, format_timestamp(&created_at)],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!(record_id = id, platform = %platform, "History record appended");

        Ok(HistoryRecord {
            id,
            prompt: prompt.to_string(),
            content: content.to_string(),
            platform: platform.to_string(),
            tone: tone.to_string(),
            created_at,
        })
    }

    fn get_history(&self, limit: usize) -> StoreResult<Vec<HistoryRecord>> {
        let conn = self.connect()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(
            r#"
            SELECT id, prompt, content, platform, tone, created_at
            FROM content_history
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map([limit], |row| {
            let id: i64 = row.get(0)?;
            let prompt: String = row.get(1)?;
            let content: String = row.get(2)?;
            let platform: Option<String> = row.get(3)?;
            let tone: Option<String> = row.get(4)?;
            let created_at: String = row.get(5)?;
            Ok((id, prompt, content, platform, tone, created_at))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, prompt, content, platform, tone, created_at_str) = row?;
            let created_at = parse_timestamp(&created_at_str).unwrap_or_else(|| {
                warn!(record_id = id, value = %created_at_str, "Unreadable history timestamp");
                postforge_util::now()
            });

            records.push(HistoryRecord {
                id,
                prompt,
                content,
                platform: platform.unwrap_or_default(),
                tone: tone.unwrap_or_default(),
                created_at,
            });
        }

        Ok(records)
    }

    fn clear_history(&self) -> StoreResult<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM content_history", [])?;
        tx.commit()?;

        debug!(removed, "History cleared");
        Ok(removed)
    }

    fn is_healthy(&self) -> bool {
        match self.connect() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Store unavailable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("postforge.db")).unwrap();
        (dir, store)
    }

    fn keys(entries: &[(ProviderId, &str)]) -> BTreeMap<ProviderId, String> {
        entries
            .iter()
            .map(|(p, k)| (*p, k.to_string()))
            .collect()
    }

    #[test]
    fn test_store_is_healthy() {
        let (_dir, store) = temp_store();
        assert!(store.is_healthy());
    }

    #[test]
    fn test_database_created_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("postforge.db");

        let store = SqliteStore::open(&path).unwrap();
        assert!(!path.exists());

        assert!(store.get_credentials().unwrap().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_credentials_upsert() {
        let (_dir, store) = temp_store();

        store
            .save_credentials(&keys(&[(ProviderId::Groq, "first"), (ProviderId::Bytez, "img")]))
            .unwrap();
        store
            .save_credentials(&keys(&[(ProviderId::Groq, "second")]))
            .unwrap();

        let creds = store.get_credentials().unwrap();
        assert_eq!(creds.get(ProviderId::Groq), Some("second"));
        assert_eq!(creds.get(ProviderId::Bytez), Some("img"));
        assert_eq!(creds.get(ProviderId::Gemini), None);
    }

    #[test]
    fn test_empty_key_never_creates_entry() {
        let (_dir, store) = temp_store();

        store
            .save_credentials(&keys(&[(ProviderId::Groq, "")]))
            .unwrap();

        let creds = store.get_credentials().unwrap();
        assert!(creds.is_empty());
    }

    #[test]
    fn test_empty_key_never_clears_entry() {
        let (_dir, store) = temp_store();

        store
            .save_credentials(&keys(&[(ProviderId::Gemini, "keep-me")]))
            .unwrap();
        store
            .save_credentials(&keys(&[(ProviderId::Gemini, "")]))
            .unwrap();

        let creds = store.get_credentials().unwrap();
        assert_eq!(creds.get(ProviderId::Gemini), Some("keep-me"));
    }

    #[test]
    fn test_history_most_recent_first() {
        let (_dir, store) = temp_store();

        for i in 0..5 {
            store
                .append_history(&format!("prompt {i}"), &format!("content {i}"), "Twitter", "Funny")
                .unwrap();
        }

        for k in 0..=5 {
            let records = store.get_history(k).unwrap();
            assert_eq!(records.len(), k);
            for (offset, record) in records.iter().enumerate() {
                assert_eq!(record.content, format!("content {}", 4 - offset));
            }
        }
    }

    #[test]
    fn test_history_record_fields() {
        let (_dir, store) = temp_store();

        let appended = store
            .append_history("Launch day", "We shipped!", "LinkedIn", "")
            .unwrap();
        assert!(appended.id > 0);

        let records = store.get_history(50).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, appended.id);
        assert_eq!(records[0].prompt, "Launch day");
        assert_eq!(records[0].platform, "LinkedIn");
        assert_eq!(records[0].tone, "");
        assert!((records[0].created_at - appended.created_at).num_milliseconds().abs() < 1);
    }

    #[test]
    fn test_clear_history() {
        let (_dir, store) = temp_store();

        store.append_history("a", "b", "General", "").unwrap();
        store.append_history("c", "d", "General", "").unwrap();

        assert_eq!(store.clear_history().unwrap(), 2);
        assert!(store.get_history(50).unwrap().is_empty());
    }

    #[test]
    fn test_history_independent_of_credentials() {
        let (_dir, store) = temp_store();

        store
            .save_credentials(&keys(&[(ProviderId::OpenRouter, "old")]))
            .unwrap();
        store.append_history("topic", "post", "Facebook", "Casual").unwrap();
        store
            .save_credentials(&keys(&[(ProviderId::OpenRouter, "rotated")]))
            .unwrap();

        let records = store.get_history(50).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "post");
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postforge.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .save_credentials(&keys(&[(ProviderId::Bytez, "persisted")]))
                .unwrap();
            store.append_history("p", "c", "Instagram", "Formal").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get_credentials().unwrap().get(ProviderId::Bytez), Some("persisted"));
        assert_eq!(store.get_history(50).unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_appends() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..10 {
                        store
                            .append_history(&format!("t{t}"), &format!("{i}"), "General", "")
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_history(100).unwrap().len(), 40);
    }

    #[test]
    fn test_created_at_is_write_time() {
        let (_dir, store) = temp_store();

        let before = postforge_util::now();
        let first = store.append_history("a", "b", "General", "").unwrap();
        let second = store.append_history("c", "d", "General", "").unwrap();
        let after = postforge_util::now();

        assert!(before <= first.created_at && first.created_at <= second.created_at);
        assert!(second.created_at <= after);

        let ids: Vec<i64> = store.get_history(2).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_unknown_provider_rows_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postforge.db");
        let store = SqliteStore::open(&path).unwrap();
        store
            .save_credentials(&keys(&[(ProviderId::Groq, "gsk-1")]))
            .unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO api_keys (provider, api_key) VALUES (?, ?)",
            params!["anthropic", "x"],
        )
        .unwrap();
        drop(conn);

        let creds = store.get_credentials().unwrap();
        assert_eq!(creds.len(), 1);
        assert_eq!(creds.get(ProviderId::Groq), Some("gsk-1"));
        assert_eq!(creds.configured().collect::<Vec<_>>(), vec![ProviderId::Groq]);
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let store = SqliteStore::open(blocker.join("postforge.db")).unwrap();
        assert!(matches!(store.get_history(10), Err(crate::StoreError::Io(_))));
        assert!(!store.is_healthy());
    }
}
