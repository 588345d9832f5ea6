//! Byte-oriented key/value media backing the record store.
//!
//! A medium stores one opaque value per key. The record store keeps one
//! serialized collection per key and always replaces the whole value, so a
//! medium never needs partial updates. Two media are provided: an in-memory
//! map for tests and deterministic fakes, and a single-table SQLite store
//! for on-disk persistence.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

/// A byte-oriented key/value medium.
///
/// Implementations replace values wholesale; concurrent writers in separate
/// processes observe last-writer-wins per key.
pub trait StorageMedium: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MediumError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), MediumError>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), MediumError>;
}

/// In-memory medium with an optional byte quota.
///
/// The quota bounds the total size of all stored values, mirroring the
/// browser-storage quota the on-device original runs against.
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    quota_bytes: Option<usize>,
}

impl MemoryMedium {
    /// Create an unbounded in-memory medium.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: None,
        }
    }

    /// Create a medium that rejects writes once total stored bytes would
    /// exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl Default for MemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MediumError> {
        let entries = self.entries.lock().map_err(|_| MediumError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), MediumError> {
        let mut entries = self.entries.lock().map_err(|_| MediumError::Poisoned)?;

        if let Some(quota) = self.quota_bytes {
            let other_bytes: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if other_bytes + value.len() > quota {
                return Err(MediumError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                });
            }
        }

        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MediumError> {
        let mut entries = self.entries.lock().map_err(|_| MediumError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// SQLite-backed medium: one row per collection key.
pub struct SqliteMedium {
    conn: Mutex<Connection>,
}

impl SqliteMedium {
    /// Open (or create) the medium at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MediumError> {
        let conn = Connection::open(path).map_err(|e| MediumError::Backend(e.to_string()))?;
        Self::init(conn)
    }

    /// Open a transient in-memory database. Useful for tests that want the
    /// real SQL path without touching disk.
    pub fn open_in_memory() -> Result<Self, MediumError> {
        let conn = Connection::open_in_memory().map_err(|e| MediumError::Backend(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, MediumError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS collections (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .map_err(|e| MediumError::Backend(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl StorageMedium for SqliteMedium {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MediumError> {
        let conn = self.conn.lock().map_err(|_| MediumError::Poisoned)?;
        conn.query_row(
            "SELECT value FROM collections WHERE key = ?1",
            params![key],
            |row| row.get::<_, Vec<u8>>(0),
        )
        .optional()
        .map_err(|e| MediumError::Backend(e.to_string()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), MediumError> {
        let conn = self.conn.lock().map_err(|_| MediumError::Poisoned)?;
        conn.execute(
            "INSERT INTO collections (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::DiskFull =>
            {
                MediumError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                }
            }
            other => MediumError::Backend(other.to_string()),
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MediumError> {
        let conn = self.conn.lock().map_err(|_| MediumError::Poisoned)?;
        conn.execute("DELETE FROM collections WHERE key = ?1", params![key])
            .map_err(|e| MediumError::Backend(e.to_string()))?;
        Ok(())
    }
}

/// Medium errors.
#[derive(Debug, thiserror::Error)]
pub enum MediumError {
    #[error("write of {size} bytes to key '{key}' rejected: quota exceeded")]
    QuotaExceeded { key: String, size: usize },

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage lock poisoned")]
    Poisoned,
}
