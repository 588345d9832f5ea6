//! Meal record types and eco-score derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Meal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealCategory {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "Breakfast",
            MealCategory::Lunch => "Lunch",
            MealCategory::Dinner => "Dinner",
            MealCategory::Snack => "Snack",
        }
    }
}

impl std::fmt::Display for MealCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A logged meal with its derived footprint.
///
/// Meals are immutable after creation except deletion. The eco-score is
/// derived from carbon and water at write time and never edited on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// Unique identifier
    pub id: Uuid,
    /// User who logged this meal
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// Ingredient names, in entry order
    pub ingredients: Vec<String>,
    /// Carbon footprint in kg CO2e
    pub carbon_kg: f64,
    /// Water usage in liters
    pub water_l: f64,
    /// Estimated calories
    pub calories: u32,
    /// Meal category
    pub category: MealCategory,
    /// Combined carbon/water efficiency, 0-100
    pub eco_score: u8,
    /// When the meal was logged
    pub created_at: DateTime<Utc>,
}

impl Meal {
    /// Create a meal with its eco-score derived from the given footprint.
    pub fn new(
        user_id: Uuid,
        name: String,
        ingredients: Vec<String>,
        category: MealCategory,
        carbon_kg: f64,
        water_l: f64,
        calories: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            ingredients,
            carbon_kg,
            water_l,
            calories,
            category,
            eco_score: eco_score(carbon_kg, water_l),
            created_at: Utc::now(),
        }
    }
}

/// Input for logging a new meal.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMeal {
    /// Display name
    pub name: String,
    /// Ingredient names
    pub ingredients: Vec<String>,
    /// Meal category
    pub category: MealCategory,
}

/// Derive the 0-100 eco-score from a meal's footprint.
///
/// Each component maps footprint onto a 0-100 scale (carbon saturates at
/// 20 kg, water at 10,000 L) and the score is their rounded mean.
pub fn eco_score(carbon_kg: f64, water_l: f64) -> u8 {
    let carbon_part = (100.0 - carbon_kg * 5.0).max(0.0);
    let water_part = (100.0 - water_l / 100.0).max(0.0);
    let score = ((carbon_part + water_part) / 2.0).round();
    score.clamp(0.0, 100.0) as u8
}

/// Aggregate meal statistics for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealStats {
    /// Number of meals logged
    pub total_meals: u32,
    /// Sum of per-meal carbon in kg CO2e
    pub total_co2_kg: f64,
    /// Sum of per-meal water in liters
    pub total_water_l: f64,
    /// Sum of per-meal calories
    pub total_calories: u64,
    /// Mean eco-score across all meals (0 with no meals)
    pub avg_eco_score: f64,
    /// Trailing week vs previous week trends
    pub weekly_trends: WeeklyTrends,
}

/// Percent change of the trailing 7 days against the 7 days before them.
///
/// A trend is 0 whenever the prior window is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrends {
    /// CO2 percent change
    pub co2_trend_pct: f64,
    /// Water percent change
    pub water_trend_pct: f64,
    /// Eco-score percent change
    pub eco_score_trend_pct: f64,
}
