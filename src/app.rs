//! Application facade wiring the medium, store and services together.
//!
//! Consumers (UI, routing, auth) construct one [`EcoTrack`] and talk to its
//! services; nothing else in the crate reaches for global state.

use std::sync::Arc;

use crate::analytics::AnalyticsAggregator;
use crate::challenges::{ChallengeCatalog, ParticipationTracker};
use crate::leaderboards::LeaderboardIndex;
use crate::meals::MealLedger;
use crate::profiles::ProfileStore;
use crate::storage::config::{self, AppConfig};
use crate::storage::medium::{MediumError, MemoryMedium, SqliteMedium, StorageMedium};
use crate::storage::store::RecordStore;

/// The assembled data layer.
pub struct EcoTrack {
    store: Arc<RecordStore>,
    /// Meal logging and per-meal footprint derivation
    pub meals: MealLedger,
    /// Challenge definitions
    pub challenges: ChallengeCatalog,
    /// Per-user challenge participation and streaks
    pub participations: ParticipationTracker,
    /// Profiles, stats and badges
    pub profiles: ProfileStore,
    /// Ranked views over profile stats
    pub leaderboard: LeaderboardIndex,
    /// Daily rollups, trends and insights
    pub analytics: AnalyticsAggregator,
}

impl EcoTrack {
    /// Assemble the data layer over an arbitrary medium.
    pub fn new(medium: Box<dyn StorageMedium>, config: AppConfig) -> Self {
        let store = Arc::new(RecordStore::new(medium));
        let profiles = ProfileStore::new(store.clone());

        Self {
            meals: MealLedger::new(store.clone(), profiles.clone(), config.baselines.clone()),
            challenges: ChallengeCatalog::new(store.clone()),
            participations: ParticipationTracker::new(store.clone(), profiles.clone()),
            leaderboard: LeaderboardIndex::new(store.clone(), config.leaderboard.clone()),
            analytics: AnalyticsAggregator::new(
                store.clone(),
                profiles.clone(),
                config.analytics.clone(),
            ),
            profiles,
            store,
        }
    }

    /// Open the on-disk data layer at the configured location.
    pub fn open(config: AppConfig) -> Result<Self, MediumError> {
        let path = if config.data_dir.as_os_str().is_empty() {
            config::get_database_path()
        } else {
            config.data_dir.join("ecotrack.db")
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MediumError::Backend(e.to_string()))?;
        }

        let medium = SqliteMedium::open(path)?;
        Ok(Self::new(Box::new(medium), config))
    }

    /// An ephemeral instance over an in-memory medium.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryMedium::new()), AppConfig::default())
    }

    /// The shared record store.
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }
}
