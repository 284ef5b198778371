//! Durable key-value backends for local client state.

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension};

use crate::chat::core::config::StorageConfig;
use crate::chat::core::errors::{ChatError, ChatResult};

/// Key-value store contract.
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the write.
    fn save(&self, key: &str, value: &str) -> ChatResult<()>;

    /// Load the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &str) -> ChatResult<Option<String>>;
}

/// `SQLite` implementation of the key-value store.
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
    table: String,
}

impl SqliteKeyValueStore {
    /// Open (or create) the store described by `config`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open(config: &StorageConfig) -> ChatResult<Self> {
        Self::with_connection(Connection::open(&config.sqlite_path)?, &config.table)
    }

    fn with_connection(conn: Connection, table: &str) -> ChatResult<Self> {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );"
        ))?;

        Ok(Self {
            conn: Mutex::new(conn),
            table: table.to_string(),
        })
    }

    fn conn(&self) -> ChatResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ChatError::StoreUnavailable("sqlite connection lock poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn save(&self, key: &str, value: &str) -> ChatResult<()> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let table = &self.table;
        self.conn()?.execute(
            &format!(
                "INSERT INTO {table} (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"
            ),
            rusqlite::params![key, value, now_ms],
        )?;
        Ok(())
    }

    fn load(&self, key: &str) -> ChatResult<Option<String>> {
        let table = &self.table;
        let value = self
            .conn()?
            .query_row(
                &format!("SELECT value FROM {table} WHERE key = ?1"),
                rusqlite::params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

/// In-process store. Used for tests and as the cold-start fallback when the
/// database file cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn save(&self, key: &str, value: &str) -> ChatResult<()> {
        self.entries
            .lock()
            .map_err(|_| ChatError::StoreUnavailable("memory store lock poisoned".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> ChatResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ChatError::StoreUnavailable("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn config_at(path: &Path) -> StorageConfig {
        StorageConfig {
            sqlite_path: path.to_path_buf(),
            ..StorageConfig::default()
        }
    }

    #[test]
    fn test_sqlite_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteKeyValueStore::open(&config_at(&dir.path().join("kv.sqlite"))).unwrap();
        assert_eq!(store.load("chats").unwrap(), None);

        store.save("chats", "{}").unwrap();
        store.save("chats", "{\"bob\":[]}").unwrap();
        assert_eq!(store.load("chats").unwrap().as_deref(), Some("{\"bob\":[]}"));
    }

    #[test]
    fn test_sqlite_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.sqlite");

        {
            let store = SqliteKeyValueStore::open(&config_at(&path)).unwrap();
            store.save("username", "\"me\"").unwrap();
        }

        let reopened = SqliteKeyValueStore::open(&config_at(&path)).unwrap();
        assert_eq!(reopened.load("username").unwrap().as_deref(), Some("\"me\""));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryKeyValueStore::new();
        store.save("theme", "\"dark\"").unwrap();
        assert_eq!(store.load("theme").unwrap().as_deref(), Some("\"dark\""));
        assert_eq!(store.load("missing").unwrap(), None);
    }
}
