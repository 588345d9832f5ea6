//! Challenge catalog: definitions and their lifecycle.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::types::{Challenge, NewChallenge};
use crate::storage::store::{collections, RecordStore, StorageError};

/// Owns challenge definitions.
///
/// Challenges are never physically deleted: retiring one means clearing its
/// active flag so existing participations keep their referent.
#[derive(Clone)]
pub struct ChallengeCatalog {
    store: Arc<RecordStore>,
}

impl ChallengeCatalog {
    /// Create a new challenge catalog.
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Create a new challenge.
    pub fn create_challenge(
        &self,
        created_by: Uuid,
        input: NewChallenge,
    ) -> Result<Challenge, CatalogError> {
        if input.title.trim().is_empty() {
            return Err(CatalogError::Validation(
                "challenge title must not be empty".to_string(),
            ));
        }
        if !input.target_value.is_finite() || input.target_value <= 0.0 {
            return Err(CatalogError::Validation(
                "challenge target must be a positive number".to_string(),
            ));
        }
        if input.duration_days == 0 {
            return Err(CatalogError::Validation(
                "challenge duration must be at least one day".to_string(),
            ));
        }

        let challenge = Challenge::new(created_by, input);

        let mut challenges: Vec<Challenge> = self.store.read_collection(collections::CHALLENGES)?;
        challenges.push(challenge.clone());
        self.store
            .write_collection(collections::CHALLENGES, &challenges)?;

        debug!(challenge = %challenge.id, title = %challenge.title, "challenge created");
        Ok(challenge)
    }

    /// Get a challenge by id, `None` when absent.
    pub fn get_challenge(&self, id: Uuid) -> Result<Option<Challenge>, CatalogError> {
        let challenges: Vec<Challenge> = self.store.read_collection(collections::CHALLENGES)?;
        Ok(challenges.into_iter().find(|c| c.id == id))
    }

    /// List challenges, optionally only active ones, in creation order.
    pub fn list_challenges(&self, active_only: bool) -> Result<Vec<Challenge>, CatalogError> {
        let challenges: Vec<Challenge> = self.store.read_collection(collections::CHALLENGES)?;
        if active_only {
            Ok(challenges.into_iter().filter(|c| c.active).collect())
        } else {
            Ok(challenges)
        }
    }

    /// Toggle a challenge's active flag.
    pub fn set_active(&self, id: Uuid, active: bool) -> Result<Challenge, CatalogError> {
        let mut challenges: Vec<Challenge> = self.store.read_collection(collections::CHALLENGES)?;

        let challenge = challenges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        challenge.active = active;
        let updated = challenge.clone();

        self.store
            .write_collection(collections::CHALLENGES, &challenges)?;
        Ok(updated)
    }
}

/// Catalog errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("challenge not found: {0}")]
    NotFound(Uuid),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
