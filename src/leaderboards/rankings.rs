//! Leaderboard rankings over profile snapshots.
//!
//! Entries are derived projections, recomputed on every query and never
//! cached across writes. Sorting is stable, so ties keep the stored
//! profile order; ranks are dense and 1-based after filtering.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use crate::profiles::types::UserProfile;
use crate::storage::config::LeaderboardSettings;
use crate::storage::store::{collections, RecordStore, StorageError};

/// Timeframe filter over last activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    /// Everyone ever active
    #[default]
    AllTime,
    /// Active since the configured start of this week
    ThisWeek,
    /// Active since the first of this month
    ThisMonth,
}

/// Ranking category; selects the descending sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    /// Total challenge points
    #[default]
    Points,
    /// Meals logged
    Meals,
    /// CO2 saved
    Co2Saved,
    /// Water saved
    WaterSaved,
    /// Challenges completed
    Challenges,
}

/// Leaderboard query options.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardQuery {
    pub timeframe: Timeframe,
    pub category: Category,
    /// Entry count; 0 means the configured default
    pub limit: usize,
}

/// One ranked leaderboard row.
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    /// Dense 1-based rank
    pub rank: u32,
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar: Option<String>,
    pub level: u32,
    pub total_points: u32,
    pub total_meals: u32,
    pub total_co2_saved_kg: f64,
    pub total_water_saved_l: f64,
    pub challenges_completed: u32,
    pub badge_count: u32,
}

impl LeaderboardEntry {
    fn from_profile(rank: u32, profile: &UserProfile) -> Self {
        Self {
            rank,
            user_id: profile.id,
            display_name: profile.display_name.clone(),
            avatar: profile.avatar.clone(),
            level: profile.stats.level,
            total_points: profile.stats.total_points,
            total_meals: profile.stats.total_meals,
            total_co2_saved_kg: profile.stats.total_co2_saved_kg,
            total_water_saved_l: profile.stats.total_water_saved_l,
            challenges_completed: profile.stats.challenges_completed,
            badge_count: profile.badges.len() as u32,
        }
    }
}

/// Produces ranked views over profile snapshots.
#[derive(Clone)]
pub struct LeaderboardIndex {
    store: Arc<RecordStore>,
    settings: LeaderboardSettings,
}

impl LeaderboardIndex {
    /// Create a new leaderboard index.
    pub fn new(store: Arc<RecordStore>, settings: LeaderboardSettings) -> Self {
        Self { store, settings }
    }

    /// Get the ranked leaderboard for a query.
    pub fn get_leaderboard(
        &self,
        query: LeaderboardQuery,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let limit = if query.limit > 0 {
            query.limit
        } else {
            self.settings.default_limit
        };

        let mut entries = self.ranked(query.timeframe, query.category)?;
        entries.truncate(limit);
        Ok(entries)
    }

    /// A user's rank in the filtered, sorted set; -1 when absent.
    pub fn get_user_rank(
        &self,
        user_id: Uuid,
        timeframe: Timeframe,
        category: Category,
    ) -> Result<i64, LeaderboardError> {
        let entries = self.ranked(timeframe, category)?;
        Ok(entries
            .iter()
            .find(|e| e.user_id == user_id)
            .map(|e| i64::from(e.rank))
            .unwrap_or(-1))
    }

    fn ranked(
        &self,
        timeframe: Timeframe,
        category: Category,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let profiles: Vec<UserProfile> = self.store.read_collection(collections::PROFILES)?;
        let today = Utc::now().date_naive();

        let mut candidates: Vec<UserProfile> = match self.window_start(timeframe, today) {
            Some(start) => profiles
                .into_iter()
                .filter(|p| p.last_active_at.date_naive() >= start)
                .collect(),
            None => profiles,
        };

        let key = |p: &UserProfile| -> f64 {
            match category {
                Category::Points => f64::from(p.stats.total_points),
                Category::Meals => f64::from(p.stats.total_meals),
                Category::Co2Saved => p.stats.total_co2_saved_kg,
                Category::WaterSaved => p.stats.total_water_saved_l,
                Category::Challenges => f64::from(p.stats.challenges_completed),
            }
        };

        // Stable sort: ties keep stored profile order.
        candidates.sort_by(|a, b| {
            key(b)
                .partial_cmp(&key(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(candidates
            .iter()
            .enumerate()
            .map(|(i, p)| LeaderboardEntry::from_profile(i as u32 + 1, p))
            .collect())
    }

    /// First date inside the timeframe, `None` for all-time.
    fn window_start(&self, timeframe: Timeframe, today: NaiveDate) -> Option<NaiveDate> {
        match timeframe {
            Timeframe::AllTime => None,
            Timeframe::ThisWeek => {
                let week_start = self.settings.week_starts_on.weekday();
                let days_back = (today.weekday().num_days_from_monday() + 7
                    - week_start.num_days_from_monday())
                    % 7;
                Some(today - chrono::Duration::days(i64::from(days_back)))
            }
            Timeframe::ThisMonth => Some(today.with_day(1).unwrap_or(today)),
        }
    }
}

/// Leaderboard errors.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
