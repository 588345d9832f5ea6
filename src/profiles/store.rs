//! Profile persistence and the stats/badge effect step.
//!
//! Every mutating path through this store follows the same sequence: merge
//! the change into the aggregate, recompute the derived level, re-evaluate
//! the badge rules, stamp activity, persist once. Callers never observe a
//! partially applied update.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::badges::{BadgeKind, BadgeRuleEngine};
use super::types::{StatsPatch, UserGoals, UserProfile};
use crate::challenges::streak;
use crate::meals::types::Meal;
use crate::storage::config::BaselineSettings;
use crate::storage::store::{collections, RecordStore, StorageError};

/// Display name used when a stats write arrives before a first login.
const DEFAULT_DISPLAY_NAME: &str = "Eco Explorer";

/// Store for user profiles.
#[derive(Clone)]
pub struct ProfileStore {
    store: Arc<RecordStore>,
}

impl ProfileStore {
    /// Create a new profile store.
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Get a profile, `None` when absent.
    pub fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, ProfileError> {
        let profiles: Vec<UserProfile> = self.store.read_collection(collections::PROFILES)?;
        Ok(profiles.into_iter().find(|p| p.id == user_id))
    }

    /// Get the profile for a user, creating it on first login.
    pub fn ensure_profile(
        &self,
        user_id: Uuid,
        display_name: &str,
    ) -> Result<UserProfile, ProfileError> {
        if display_name.trim().is_empty() {
            return Err(ProfileError::Validation(
                "display name must not be empty".to_string(),
            ));
        }
        self.upsert(user_id, Some(display_name), |_| {})
    }

    /// Merge a partial stats update, recompute the level, evaluate badges
    /// and persist.
    pub fn update_stats(
        &self,
        user_id: Uuid,
        patch: StatsPatch,
    ) -> Result<UserProfile, ProfileError> {
        self.upsert(user_id, None, |profile| {
            patch.apply_to(&mut profile.stats);
        })
    }

    /// Replace a user's goal targets.
    pub fn update_goals(&self, user_id: Uuid, goals: UserGoals) -> Result<UserProfile, ProfileError> {
        self.upsert(user_id, None, |profile| {
            profile.goals = goals;
        })
    }

    /// Award a specific badge kind directly.
    ///
    /// Exposed for the fixed set of [`BadgeKind`] identifiers. Awarding is
    /// idempotent: a badge name already on the profile is left alone.
    pub fn award_badge(&self, user_id: Uuid, kind: BadgeKind) -> Result<UserProfile, ProfileError> {
        self.upsert(user_id, None, |profile| {
            if !profile.has_badge(kind.name()) {
                profile.badges.push(kind.to_badge());
                profile.stats.achievements.push(kind.name().to_string());
                info!(user = %profile.id, badge = kind.name(), "badge awarded");
            }
        })
    }

    /// Recompute all meal-derived stats for a user.
    ///
    /// Invoked by the meal ledger after every meal mutation: total meals,
    /// CO2/water saved against the configured baselines, and the daily
    /// logging streak reconstructed from meal dates.
    pub fn apply_meal_effects(
        &self,
        user_id: Uuid,
        user_meals: &[Meal],
        baselines: &BaselineSettings,
    ) -> Result<UserProfile, ProfileError> {
        let co2_saved: f64 = user_meals
            .iter()
            .map(|m| (baselines.co2_kg_per_meal - m.carbon_kg).max(0.0))
            .sum();
        let water_saved: f64 = user_meals
            .iter()
            .map(|m| (baselines.water_l_per_meal - m.water_l).max(0.0))
            .sum();

        let logged_days = user_meals
            .iter()
            .map(|m| (m.created_at.date_naive(), true))
            .collect();
        let streak_days = streak::current_streak(&logged_days, Utc::now().date_naive());

        debug!(user = %user_id, meals = user_meals.len(), streak_days, "recomputing meal-derived stats");

        self.upsert(user_id, None, |profile| {
            profile.stats.total_meals = user_meals.len() as u32;
            profile.stats.total_co2_saved_kg = co2_saved;
            profile.stats.total_water_saved_l = water_saved;
            profile.stats.streak_days = streak_days;
        })
    }

    /// Credit a completed challenge: one completion and its point value.
    pub fn apply_challenge_completion(
        &self,
        user_id: Uuid,
        points: u32,
    ) -> Result<UserProfile, ProfileError> {
        self.upsert(user_id, None, |profile| {
            profile.stats.challenges_completed += 1;
            profile.stats.total_points += points;
        })
    }

    /// Read-modify-write a single profile, creating it if absent.
    ///
    /// Runs the full effect sequence after `mutate`: level recompute, badge
    /// rule evaluation, activity stamp, one collection write.
    fn upsert<F>(
        &self,
        user_id: Uuid,
        display_name: Option<&str>,
        mutate: F,
    ) -> Result<UserProfile, ProfileError>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profiles: Vec<UserProfile> = self.store.read_collection(collections::PROFILES)?;

        let index = match profiles.iter().position(|p| p.id == user_id) {
            Some(index) => index,
            None => {
                let name = display_name.unwrap_or(DEFAULT_DISPLAY_NAME);
                profiles.push(UserProfile::new(user_id, name.to_string()));
                profiles.len() - 1
            }
        };

        let profile = &mut profiles[index];
        mutate(profile);
        profile.stats.recompute_level();

        let unlocked = BadgeRuleEngine::evaluate(profile);
        for kind in &unlocked {
            info!(user = %user_id, badge = kind.name(), "badge unlocked");
        }

        profile.last_active_at = Utc::now();
        let updated = profile.clone();

        self.store
            .write_collection(collections::PROFILES, &profiles)?;

        Ok(updated)
    }
}

/// Profile store errors.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("validation error: {0}")]
    Validation(String),
}
