//! Typed record collections over a key/value medium.
//!
//! Each logical collection (`meals`, `challenges`, `participations`,
//! `profiles`) is stored as one JSON array under one medium key. Every
//! mutation is a full read, modify in memory, full write; there is no
//! partial update. Two writers in separate processes therefore observe
//! last-writer-wins on the whole collection, matching the single-device
//! medium this layer was designed for.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::medium::{MediumError, StorageMedium};

/// Collection key names.
pub mod collections {
    pub const MEALS: &str = "meals";
    pub const CHALLENGES: &str = "challenges";
    pub const PARTICIPATIONS: &str = "participations";
    pub const PROFILES: &str = "profiles";
}

/// Generic persistence for typed record collections.
pub struct RecordStore {
    medium: Box<dyn StorageMedium>,
}

impl RecordStore {
    /// Create a record store over the given medium.
    pub fn new(medium: Box<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    /// Read a whole collection in stored order.
    ///
    /// An absent key reads as an empty collection. Stored bytes that are not
    /// a valid JSON array of `T` also read as empty: the corruption is
    /// logged and the caller keeps working, it is never a crash.
    pub fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StorageError> {
        let bytes = match self.medium.get(name)? {
            Some(bytes) => bytes,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(collection = name, error = %e, "stored collection is corrupt, reading as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Replace a whole collection.
    ///
    /// A rejected write (quota) surfaces as a recoverable error; the
    /// previously persisted value and the caller's in-memory records are
    /// left intact.
    pub fn write_collection<T: Serialize>(
        &self,
        name: &str,
        records: &[T],
    ) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(records)?;
        self.medium.set(name, &bytes)?;
        Ok(())
    }

    /// Drop a collection entirely. Used by account-reset flows.
    pub fn remove_collection(&self, name: &str) -> Result<(), StorageError> {
        self.medium.remove(name)?;
        Ok(())
    }
}

/// Record store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("collection '{collection}' write rejected: medium quota exceeded")]
    QuotaExceeded { collection: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage medium error: {0}")]
    Medium(String),
}

impl From<MediumError> for StorageError {
    fn from(e: MediumError) -> Self {
        match e {
            MediumError::QuotaExceeded { key, .. } => StorageError::QuotaExceeded { collection: key },
            other => StorageError::Medium(other.to_string()),
        }
    }
}
