//! Unit tests for leaderboard queries.

use uuid::Uuid;

use ecotrack::leaderboards::{Category, LeaderboardQuery, Timeframe};
use ecotrack::profiles::StatsPatch;
use ecotrack::EcoTrack;

fn seed_user(app: &EcoTrack, name: &str, points: u32, co2_saved: f64) -> Uuid {
    let user = Uuid::new_v4();
    app.profiles.ensure_profile(user, name).unwrap();
    app.profiles
        .update_stats(
            user,
            StatsPatch {
                total_points: Some(points),
                total_co2_saved_kg: Some(co2_saved),
                ..Default::default()
            },
        )
        .unwrap();
    user
}

#[test]
fn test_top_three_by_points_is_deterministic() {
    let app = EcoTrack::in_memory();
    seed_user(&app, "ana", 120, 1.0);
    seed_user(&app, "ben", 300, 2.0);
    seed_user(&app, "cam", 300, 3.0);
    seed_user(&app, "dee", 40, 4.0);

    let query = LeaderboardQuery {
        timeframe: Timeframe::AllTime,
        category: Category::Points,
        limit: 3,
    };

    let first = app.leaderboard.get_leaderboard(query).unwrap();
    let second = app.leaderboard.get_leaderboard(query).unwrap();

    assert_eq!(first.len(), 3);
    let snapshot = |entries: &[ecotrack::leaderboards::LeaderboardEntry]| {
        entries
            .iter()
            .map(|e| (e.rank, e.display_name.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(snapshot(&first), snapshot(&second));

    // Tie between ben and cam keeps stored order.
    assert_eq!(first[0].display_name, "ben");
    assert_eq!(first[1].display_name, "cam");
    assert_eq!(first[2].display_name, "ana");
}

#[test]
fn test_categories_rank_independently() {
    let app = EcoTrack::in_memory();
    seed_user(&app, "points-heavy", 500, 1.0);
    let co2_heavy = seed_user(&app, "co2-heavy", 10, 99.0);

    let by_co2 = app
        .leaderboard
        .get_leaderboard(LeaderboardQuery {
            category: Category::Co2Saved,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(by_co2[0].user_id, co2_heavy);

    let rank = app
        .leaderboard
        .get_user_rank(co2_heavy, Timeframe::AllTime, Category::Points)
        .unwrap();
    assert_eq!(rank, 2);
}

#[test]
fn test_absent_user_rank_is_minus_one() {
    let app = EcoTrack::in_memory();
    seed_user(&app, "only", 10, 0.0);

    let rank = app
        .leaderboard
        .get_user_rank(Uuid::new_v4(), Timeframe::AllTime, Category::Points)
        .unwrap();
    assert_eq!(rank, -1);
}

#[test]
fn test_badge_count_is_projected() {
    let app = EcoTrack::in_memory();
    let user = Uuid::new_v4();
    app.profiles.ensure_profile(user, "badger").unwrap();
    app.profiles
        .update_stats(
            user,
            StatsPatch {
                total_meals: Some(1),
                streak_days: Some(7),
                ..Default::default()
            },
        )
        .unwrap();

    let entries = app
        .leaderboard
        .get_leaderboard(LeaderboardQuery::default())
        .unwrap();
    assert_eq!(entries[0].badge_count, 2);
}
