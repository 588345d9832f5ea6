//! The meal ledger: append-only meal records and their derived stats.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use super::factors;
use super::types::{Meal, MealStats, NewMeal, WeeklyTrends};
use crate::analytics::percent_change;
use crate::profiles::store::{ProfileError, ProfileStore};
use crate::storage::config::BaselineSettings;
use crate::storage::store::{collections, RecordStore, StorageError};

/// Appends meal records and keeps profile aggregates in step.
///
/// Every mutation runs the same effect sequence: persist the meal
/// collection, then hand the user's meals to the profile store so totals,
/// savings, streak and badges are recomputed before the call returns.
#[derive(Clone)]
pub struct MealLedger {
    store: Arc<RecordStore>,
    profiles: ProfileStore,
    baselines: BaselineSettings,
}

impl MealLedger {
    /// Create a new meal ledger.
    pub fn new(store: Arc<RecordStore>, profiles: ProfileStore, baselines: BaselineSettings) -> Self {
        Self {
            store,
            profiles,
            baselines,
        }
    }

    /// Log a meal.
    ///
    /// Carbon, water and calories are summed from the ingredient factor
    /// table; the eco-score is derived from carbon and water at write time.
    /// Malformed input is rejected before any mutation.
    pub fn add_meal(&self, user_id: Uuid, input: NewMeal) -> Result<Meal, MealError> {
        if input.name.trim().is_empty() {
            return Err(MealError::Validation(
                "meal name must not be empty".to_string(),
            ));
        }
        if input.ingredients.is_empty()
            || input.ingredients.iter().all(|i| i.trim().is_empty())
        {
            return Err(MealError::Validation(
                "a meal needs at least one ingredient".to_string(),
            ));
        }

        let (carbon_kg, water_l, calories) = factors::footprint_of(&input.ingredients);
        let meal = Meal::new(
            user_id,
            input.name,
            input.ingredients,
            input.category,
            carbon_kg,
            water_l,
            calories,
        );

        let mut meals: Vec<Meal> = self.store.read_collection(collections::MEALS)?;
        meals.push(meal.clone());
        self.store.write_collection(collections::MEALS, &meals)?;

        debug!(user = %user_id, meal = %meal.id, eco_score = meal.eco_score, "meal logged");
        self.recompute_profile(user_id, &meals)?;

        Ok(meal)
    }

    /// Delete a meal and recompute the owner's aggregates.
    ///
    /// Returns `false` when no such meal exists for the user.
    pub fn delete_meal(&self, meal_id: Uuid, user_id: Uuid) -> Result<bool, MealError> {
        let mut meals: Vec<Meal> = self.store.read_collection(collections::MEALS)?;

        let before = meals.len();
        meals.retain(|m| !(m.id == meal_id && m.user_id == user_id));
        if meals.len() == before {
            return Ok(false);
        }

        self.store.write_collection(collections::MEALS, &meals)?;
        self.recompute_profile(user_id, &meals)?;
        Ok(true)
    }

    /// Get a meal by id, `None` when absent.
    pub fn get_meal(&self, meal_id: Uuid) -> Result<Option<Meal>, MealError> {
        let meals: Vec<Meal> = self.store.read_collection(collections::MEALS)?;
        Ok(meals.into_iter().find(|m| m.id == meal_id))
    }

    /// A user's meals, newest first.
    pub fn get_user_meals(&self, user_id: Uuid) -> Result<Vec<Meal>, MealError> {
        let mut meals: Vec<Meal> = self.store.read_collection(collections::MEALS)?;
        meals.retain(|m| m.user_id == user_id);
        meals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(meals)
    }

    /// Aggregate stats plus trailing-week-vs-previous-week trends.
    pub fn get_user_stats(&self, user_id: Uuid) -> Result<MealStats, MealError> {
        let meals: Vec<Meal> = self.store.read_collection(collections::MEALS)?;
        let user_meals: Vec<&Meal> = meals.iter().filter(|m| m.user_id == user_id).collect();

        let total_meals = user_meals.len() as u32;
        let total_co2_kg: f64 = user_meals.iter().map(|m| m.carbon_kg).sum();
        let total_water_l: f64 = user_meals.iter().map(|m| m.water_l).sum();
        let total_calories: u64 = user_meals.iter().map(|m| u64::from(m.calories)).sum();
        let avg_eco_score = if user_meals.is_empty() {
            0.0
        } else {
            user_meals.iter().map(|m| f64::from(m.eco_score)).sum::<f64>() / user_meals.len() as f64
        };

        Ok(MealStats {
            total_meals,
            total_co2_kg,
            total_water_l,
            total_calories,
            avg_eco_score,
            weekly_trends: Self::weekly_trends(&user_meals),
        })
    }

    /// Trailing 7 days vs the 7 days before them, as percent change.
    fn weekly_trends(user_meals: &[&Meal]) -> WeeklyTrends {
        let today = Utc::now().date_naive();
        let recent_start = today - Duration::days(6);
        let prev_start = today - Duration::days(13);

        let recent: Vec<&Meal> = user_meals
            .iter()
            .copied()
            .filter(|m| m.created_at.date_naive() >= recent_start)
            .collect();
        let previous: Vec<&Meal> = user_meals
            .iter()
            .copied()
            .filter(|m| {
                let date = m.created_at.date_naive();
                date >= prev_start && date < recent_start
            })
            .collect();

        let co2 = |meals: &[&Meal]| meals.iter().map(|m| m.carbon_kg).sum::<f64>();
        let water = |meals: &[&Meal]| meals.iter().map(|m| m.water_l).sum::<f64>();
        let mean_eco = |meals: &[&Meal]| {
            if meals.is_empty() {
                0.0
            } else {
                meals.iter().map(|m| f64::from(m.eco_score)).sum::<f64>() / meals.len() as f64
            }
        };

        WeeklyTrends {
            co2_trend_pct: percent_change(co2(&recent), co2(&previous)),
            water_trend_pct: percent_change(water(&recent), water(&previous)),
            eco_score_trend_pct: percent_change(mean_eco(&recent), mean_eco(&previous)),
        }
    }

    fn recompute_profile(&self, user_id: Uuid, all_meals: &[Meal]) -> Result<(), MealError> {
        let user_meals: Vec<Meal> = all_meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        self.profiles
            .apply_meal_effects(user_id, &user_meals, &self.baselines)?;
        Ok(())
    }
}

/// Meal ledger errors.
#[derive(Debug, thiserror::Error)]
pub enum MealError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
}
