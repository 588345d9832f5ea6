//! Persistence: key/value media, typed record collections, configuration.

pub mod config;
pub mod medium;
pub mod store;

pub use config::{AppConfig, BaselineSettings, ConfigError};
pub use medium::{MediumError, MemoryMedium, SqliteMedium, StorageMedium};
pub use store::{collections, RecordStore, StorageError};
