//! User profile, stats aggregate, goals and badge types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile with its embedded stats, goals and badges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub display_name: String,
    /// Avatar image reference
    pub avatar: Option<String>,
    /// Preference bag
    pub preferences: Preferences,
    /// Aggregate statistics
    pub stats: UserStats,
    /// Numeric goal targets
    pub goals: UserGoals,
    /// Earned badges, in earn order; append-only
    pub badges: Vec<Badge>,
    /// Profile creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp, stamped on every stats write
    pub last_active_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a fresh profile for a first login.
    pub fn new(id: Uuid, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            display_name,
            avatar: None,
            preferences: Preferences::default(),
            stats: UserStats::default(),
            goals: UserGoals::default(),
            badges: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    /// Whether a badge with this name is already on the profile.
    pub fn has_badge(&self, name: &str) -> bool {
        self.badges.iter().any(|b| b.name == name)
    }
}

/// User preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Dietary preference tags (e.g. "vegetarian")
    pub dietary: Vec<String>,
    /// Whether the weekly summary is wanted
    pub weekly_summary: bool,
}

/// Aggregate per-user statistics.
///
/// The level is derived from points on every write and never stored out of
/// sync; see [`UserStats::level_for_points`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    /// Meals logged
    pub total_meals: u32,
    /// CO2 saved vs the configured per-meal baseline, in kg
    pub total_co2_saved_kg: f64,
    /// Water saved vs the configured per-meal baseline, in liters
    pub total_water_saved_l: f64,
    /// Current daily logging streak
    pub streak_days: u32,
    /// Challenges completed
    pub challenges_completed: u32,
    /// Points earned from challenges
    pub total_points: u32,
    /// Derived level
    pub level: u32,
    /// Names of earned achievements, in earn order
    pub achievements: Vec<String>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_meals: 0,
            total_co2_saved_kg: 0.0,
            total_water_saved_l: 0.0,
            streak_days: 0,
            challenges_completed: 0,
            total_points: 0,
            level: 1,
            achievements: Vec::new(),
        }
    }
}

impl UserStats {
    /// Level for a point total: one level per 100 points, starting at 1.
    pub fn level_for_points(points: u32) -> u32 {
        points / 100 + 1
    }

    /// Recompute the derived level from the current point total.
    pub fn recompute_level(&mut self) {
        self.level = Self::level_for_points(self.total_points);
    }
}

/// Partial stats update; unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct StatsPatch {
    pub total_meals: Option<u32>,
    pub total_co2_saved_kg: Option<f64>,
    pub total_water_saved_l: Option<f64>,
    pub streak_days: Option<u32>,
    pub challenges_completed: Option<u32>,
    pub total_points: Option<u32>,
}

impl StatsPatch {
    /// Merge the set fields into a stats aggregate.
    pub fn apply_to(&self, stats: &mut UserStats) {
        if let Some(v) = self.total_meals {
            stats.total_meals = v;
        }
        if let Some(v) = self.total_co2_saved_kg {
            stats.total_co2_saved_kg = v;
        }
        if let Some(v) = self.total_water_saved_l {
            stats.total_water_saved_l = v;
        }
        if let Some(v) = self.streak_days {
            stats.streak_days = v;
        }
        if let Some(v) = self.challenges_completed {
            stats.challenges_completed = v;
        }
        if let Some(v) = self.total_points {
            stats.total_points = v;
        }
    }
}

/// Numeric goal targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserGoals {
    /// Meals to log per day
    pub daily_meals: u32,
    /// Mean eco-score to hold per week
    pub weekly_eco_score: f64,
    /// Meals to log per month
    pub monthly_meals: u32,
    /// Monthly carbon budget in kg CO2e
    pub monthly_co2_kg: f64,
    /// Monthly water budget in liters
    pub monthly_water_l: f64,
}

impl Default for UserGoals {
    fn default() -> Self {
        Self {
            daily_meals: 3,
            weekly_eco_score: 70.0,
            monthly_meals: 60,
            monthly_co2_kg: 100.0,
            monthly_water_l: 60_000.0,
        }
    }
}

/// Badge category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    /// Meal logging milestones
    Meals,
    /// Streak milestones
    Streaks,
    /// Footprint savings milestones
    Impact,
    /// Challenge milestones
    Challenges,
    /// Level milestones
    Levels,
}

/// A permanent achievement record.
///
/// Badge names are unique per profile; badges are never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    /// Unique identifier
    pub id: Uuid,
    /// Badge name, unique per profile
    pub name: String,
    /// Description of what earned it
    pub description: String,
    /// Icon glyph
    pub icon: String,
    /// Category tag
    pub category: BadgeCategory,
    /// When the badge was earned
    pub earned_at: DateTime<Utc>,
}
