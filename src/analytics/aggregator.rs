//! Daily rollups of meal metrics, weekly trends and monthly progress.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::insights::{self, Insight, InsightContext};
use super::percent_change;
use crate::meals::types::{Meal, WeeklyTrends};
use crate::profiles::store::{ProfileError, ProfileStore};
use crate::profiles::types::UserGoals;
use crate::storage::config::AnalyticsSettings;
use crate::storage::store::{collections, RecordStore, StorageError};

/// Per-calendar-day aggregate of one user's meals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub meal_count: u32,
    pub co2_kg: f64,
    pub water_l: f64,
    pub calories: u64,
    /// Mean eco-score for the day; 0 when no meals
    pub avg_eco_score: f64,
}

/// Sums since the first of the current month, against goal targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyProgress {
    pub meals: u32,
    pub co2_kg: f64,
    pub water_l: f64,
    /// Meals logged as a percentage of the monthly meal goal
    pub meals_goal_pct: f64,
    /// CO2 as a percentage of the monthly carbon budget
    pub co2_goal_pct: f64,
    /// Water as a percentage of the monthly water budget
    pub water_goal_pct: f64,
}

/// The full analytics view for one user and window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAnalytics {
    /// One bucket per calendar day, oldest first
    pub daily: Vec<DailyBucket>,
    pub weekly_trends: WeeklyTrends,
    pub monthly: MonthlyProgress,
    pub insights: Vec<Insight>,
}

/// Rolls meal records up into time buckets and synthesized insights.
#[derive(Clone)]
pub struct AnalyticsAggregator {
    store: Arc<RecordStore>,
    profiles: ProfileStore,
    settings: AnalyticsSettings,
}

impl AnalyticsAggregator {
    /// Create a new analytics aggregator.
    pub fn new(store: Arc<RecordStore>, profiles: ProfileStore, settings: AnalyticsSettings) -> Self {
        Self {
            store,
            profiles,
            settings,
        }
    }

    /// Build the analytics view for the trailing `days` calendar days.
    pub fn get_user_analytics(
        &self,
        user_id: Uuid,
        days: u32,
    ) -> Result<UserAnalytics, AnalyticsError> {
        let meals: Vec<Meal> = self.store.read_collection(collections::MEALS)?;
        let user_meals: Vec<&Meal> = meals.iter().filter(|m| m.user_id == user_id).collect();

        let today = Utc::now().date_naive();
        let daily = Self::daily_buckets(&user_meals, today, days.max(1));
        let weekly_trends = Self::weekly_trends(&daily);
        let monthly = self.monthly_progress(user_id, &user_meals, today)?;

        let last7 = &daily[daily.len().saturating_sub(7)..];
        let active_days_last_week = last7.iter().filter(|b| b.meal_count > 0).count() as u32;
        let avg_eco_score_last_week = {
            let active: Vec<&DailyBucket> = last7.iter().filter(|b| b.meal_count > 0).collect();
            if active.is_empty() {
                0.0
            } else {
                active.iter().map(|b| b.avg_eco_score).sum::<f64>() / active.len() as f64
            }
        };

        let streak_days = self
            .profiles
            .get_profile(user_id)?
            .map(|p| p.stats.streak_days)
            .unwrap_or(0);

        let ctx = InsightContext {
            co2_trend_pct: weekly_trends.co2_trend_pct,
            water_trend_pct: weekly_trends.water_trend_pct,
            eco_trend_pct: weekly_trends.eco_score_trend_pct,
            active_days_last_week,
            avg_eco_score_last_week,
            streak_days,
        };
        let insights = insights::generate(&ctx, &self.settings);

        Ok(UserAnalytics {
            daily,
            weekly_trends,
            monthly,
            insights,
        })
    }

    /// One bucket per calendar day, oldest first, ending today.
    fn daily_buckets(user_meals: &[&Meal], today: NaiveDate, days: u32) -> Vec<DailyBucket> {
        (0..days)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(i64::from(offset));
                let on_day: Vec<&&Meal> = user_meals
                    .iter()
                    .filter(|m| m.created_at.date_naive() == date)
                    .collect();

                let meal_count = on_day.len() as u32;
                let avg_eco_score = if on_day.is_empty() {
                    0.0
                } else {
                    on_day.iter().map(|m| f64::from(m.eco_score)).sum::<f64>()
                        / on_day.len() as f64
                };

                DailyBucket {
                    date,
                    meal_count,
                    co2_kg: on_day.iter().map(|m| m.carbon_kg).sum(),
                    water_l: on_day.iter().map(|m| m.water_l).sum(),
                    calories: on_day.iter().map(|m| u64::from(m.calories)).sum(),
                    avg_eco_score,
                }
            })
            .collect()
    }

    /// Mean of the most recent 7 buckets against the preceding 7.
    ///
    /// Fewer than 14 buckets means there is no prior week to compare
    /// against, so every trend is 0.
    fn weekly_trends(daily: &[DailyBucket]) -> WeeklyTrends {
        if daily.len() < 14 {
            return WeeklyTrends::default();
        }

        let recent = &daily[daily.len() - 7..];
        let previous = &daily[daily.len() - 14..daily.len() - 7];

        let mean = |buckets: &[DailyBucket], f: fn(&DailyBucket) -> f64| {
            buckets.iter().map(f).sum::<f64>() / buckets.len() as f64
        };

        WeeklyTrends {
            co2_trend_pct: percent_change(
                mean(recent, |b| b.co2_kg),
                mean(previous, |b| b.co2_kg),
            ),
            water_trend_pct: percent_change(
                mean(recent, |b| b.water_l),
                mean(previous, |b| b.water_l),
            ),
            eco_score_trend_pct: percent_change(
                mean(recent, |b| b.avg_eco_score),
                mean(previous, |b| b.avg_eco_score),
            ),
        }
    }

    /// Sums from the first of the current calendar month, against goals.
    fn monthly_progress(
        &self,
        user_id: Uuid,
        user_meals: &[&Meal],
        today: NaiveDate,
    ) -> Result<MonthlyProgress, AnalyticsError> {
        let month_start = today.with_day(1).unwrap_or(today);
        let this_month: Vec<&&Meal> = user_meals
            .iter()
            .filter(|m| m.created_at.date_naive() >= month_start)
            .collect();

        let meals = this_month.len() as u32;
        let co2_kg: f64 = this_month.iter().map(|m| m.carbon_kg).sum();
        let water_l: f64 = this_month.iter().map(|m| m.water_l).sum();

        let goals = self
            .profiles
            .get_profile(user_id)?
            .map(|p| p.goals)
            .unwrap_or_else(UserGoals::default);

        let pct = |value: f64, goal: f64| if goal > 0.0 { value / goal * 100.0 } else { 0.0 };

        Ok(MonthlyProgress {
            meals,
            co2_kg,
            water_l,
            meals_goal_pct: pct(f64::from(meals), f64::from(goals.monthly_meals)),
            co2_goal_pct: pct(co2_kg, goals.monthly_co2_kg),
            water_goal_pct: pct(water_l, goals.monthly_water_l),
        })
    }
}

/// Analytics errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
}
