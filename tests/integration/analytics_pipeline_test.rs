//! End-to-end analytics: buckets, trends, insights, monthly progress.

use chrono::{Duration, Utc};
use uuid::Uuid;

use ecotrack::analytics::InsightKind;
use ecotrack::meals::types::Meal;
use ecotrack::meals::MealCategory;
use ecotrack::storage::collections;
use ecotrack::EcoTrack;

/// Write one meal per day for `days_ago` range with fixed daily footprint.
fn backdated_meals(user: Uuid, days: std::ops::Range<i64>, carbon: f64, water: f64) -> Vec<Meal> {
    days.map(|days_ago| {
        let mut meal = Meal::new(
            user,
            format!("day-{days_ago}"),
            vec!["rice".to_string()],
            MealCategory::Dinner,
            carbon,
            water,
            450,
        );
        meal.created_at = Utc::now() - Duration::days(days_ago);
        meal
    })
    .collect()
}

#[test]
fn test_rising_co2_trend_emits_achievement_insight() {
    let app = EcoTrack::in_memory();
    let user = Uuid::new_v4();

    // Last week 1 kg/day, this week 2 kg/day: trend +100%.
    let mut meals = backdated_meals(user, 0..7, 2.0, 400.0);
    meals.extend(backdated_meals(user, 7..14, 1.0, 400.0));
    app.store()
        .write_collection(collections::MEALS, &meals)
        .unwrap();

    let analytics = app.analytics.get_user_analytics(user, 14).unwrap();
    assert!(analytics.weekly_trends.co2_trend_pct > 10.0);

    let co2_insight = &analytics.insights[0];
    assert_eq!(co2_insight.kind, InsightKind::Achievement);
    assert_eq!(co2_insight.title, "Carbon trend up");
}

#[test]
fn test_falling_co2_trend_emits_warning_insight() {
    let app = EcoTrack::in_memory();
    let user = Uuid::new_v4();

    // Last week 4 kg/day, this week 1 kg/day: trend -75%.
    let mut meals = backdated_meals(user, 0..7, 1.0, 400.0);
    meals.extend(backdated_meals(user, 7..14, 4.0, 400.0));
    app.store()
        .write_collection(collections::MEALS, &meals)
        .unwrap();

    let analytics = app.analytics.get_user_analytics(user, 14).unwrap();
    assert!(analytics.weekly_trends.co2_trend_pct < -10.0);

    let co2_insight = &analytics.insights[0];
    assert_eq!(co2_insight.kind, InsightKind::Warning);
    assert_eq!(co2_insight.title, "Carbon trend down");
}

#[test]
fn test_buckets_sum_per_day_and_zero_empty_days() {
    let app = EcoTrack::in_memory();
    let user = Uuid::new_v4();

    let mut meals = backdated_meals(user, 0..1, 1.5, 300.0);
    meals.extend(backdated_meals(user, 0..1, 0.5, 100.0));
    app.store()
        .write_collection(collections::MEALS, &meals)
        .unwrap();

    let analytics = app.analytics.get_user_analytics(user, 3).unwrap();
    assert_eq!(analytics.daily.len(), 3);

    let today = analytics.daily.last().unwrap();
    assert_eq!(today.meal_count, 2);
    assert!((today.co2_kg - 2.0).abs() < 1e-9);
    assert!((today.water_l - 400.0).abs() < 1e-9);
    assert_eq!(today.calories, 900);

    let yesterday = &analytics.daily[1];
    assert_eq!(yesterday.meal_count, 0);
    assert_eq!(yesterday.avg_eco_score, 0.0);
}

#[test]
fn test_consistency_insight_after_five_active_days() {
    let app = EcoTrack::in_memory();
    let user = Uuid::new_v4();

    // Five of the last seven days active, low footprint so no trend noise.
    let meals = backdated_meals(user, 0..5, 0.5, 150.0);
    app.store()
        .write_collection(collections::MEALS, &meals)
        .unwrap();

    let analytics = app.analytics.get_user_analytics(user, 7).unwrap();
    assert!(analytics
        .insights
        .iter()
        .any(|i| i.kind == InsightKind::Consistency));
}

#[test]
fn test_insights_capped_at_configured_maximum() {
    let app = EcoTrack::in_memory();
    let user = Uuid::new_v4();

    // Rising CO2 and water trends plus daily activity and a weak eco-score
    // fire more rules than the cap allows.
    let mut meals = backdated_meals(user, 0..7, 8.0, 5000.0);
    meals.extend(backdated_meals(user, 7..14, 1.0, 500.0));
    app.store()
        .write_collection(collections::MEALS, &meals)
        .unwrap();

    let analytics = app.analytics.get_user_analytics(user, 14).unwrap();
    assert!(analytics.insights.len() <= 5);
    assert!(!analytics.insights.is_empty());
}

#[test]
fn test_monthly_progress_counts_only_this_month() {
    let app = EcoTrack::in_memory();
    let user = Uuid::new_v4();

    // One meal today, one far in the past.
    let mut meals = backdated_meals(user, 0..1, 2.0, 600.0);
    meals.extend(backdated_meals(user, 300..301, 9.0, 900.0));
    app.store()
        .write_collection(collections::MEALS, &meals)
        .unwrap();

    let analytics = app.analytics.get_user_analytics(user, 30).unwrap();
    assert_eq!(analytics.monthly.meals, 1);
    assert!((analytics.monthly.co2_kg - 2.0).abs() < 1e-9);
}
