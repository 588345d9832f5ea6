//! End-to-end challenge flow: create, join, progress, complete.

use uuid::Uuid;

use ecotrack::challenges::{ChallengeType, Difficulty, NewChallenge, ParticipationError};
use ecotrack::leaderboards::{Category, LeaderboardQuery, Timeframe};
use ecotrack::EcoTrack;

fn water_challenge(app: &EcoTrack, points: u32) -> ecotrack::challenges::Challenge {
    app.challenges
        .create_challenge(
            Uuid::new_v4(),
            NewChallenge {
                title: "Save 500 liters".to_string(),
                description: "Cut water-heavy meals for two weeks".to_string(),
                challenge_type: ChallengeType::WaterSaving,
                target_value: 500.0,
                unit: "liters".to_string(),
                duration_days: 14,
                difficulty: Difficulty::Medium,
                points,
                instructions: vec!["Prefer low-water ingredients".to_string()],
                tips: vec!["Legumes over beef".to_string()],
                rules: vec![],
            },
        )
        .unwrap()
}

#[test]
fn test_join_is_unique_per_pair() {
    let app = EcoTrack::in_memory();
    let challenge = water_challenge(&app, 100);
    let user = Uuid::new_v4();

    app.participations.join_challenge(challenge.id, user).unwrap();
    let err = app
        .participations
        .join_challenge(challenge.id, user)
        .unwrap_err();
    assert!(matches!(err, ParticipationError::AlreadyParticipating { .. }));

    // The failed attempt left the participant set alone.
    let stored = app.challenges.get_challenge(challenge.id).unwrap().unwrap();
    assert_eq!(stored.participants, vec![user]);

    // A second user joins the same challenge fine.
    let other = Uuid::new_v4();
    app.participations.join_challenge(challenge.id, other).unwrap();
    let stored = app.challenges.get_challenge(challenge.id).unwrap().unwrap();
    assert_eq!(stored.participants.len(), 2);
}

#[test]
fn test_completion_feeds_points_badges_and_leaderboard() {
    let app = EcoTrack::in_memory();
    let challenge = water_challenge(&app, 150);
    let winner = Uuid::new_v4();
    let runner_up = Uuid::new_v4();

    app.profiles.ensure_profile(winner, "winner").unwrap();
    app.profiles.ensure_profile(runner_up, "runner-up").unwrap();

    app.participations.join_challenge(challenge.id, winner).unwrap();
    app.participations.join_challenge(challenge.id, runner_up).unwrap();

    app.participations
        .record_progress(challenge.id, winner, 520.0)
        .unwrap();
    app.participations
        .record_progress(challenge.id, runner_up, 140.0)
        .unwrap();

    let winner_profile = app.profiles.get_profile(winner).unwrap().unwrap();
    assert_eq!(winner_profile.stats.total_points, 150);
    assert_eq!(winner_profile.stats.challenges_completed, 1);
    assert_eq!(winner_profile.stats.level, 2);
    assert!(winner_profile.has_badge("Challenger"));

    let board = app
        .leaderboard
        .get_leaderboard(LeaderboardQuery {
            timeframe: Timeframe::AllTime,
            category: Category::Points,
            limit: 10,
        })
        .unwrap();
    assert_eq!(board[0].user_id, winner);
    assert_eq!(board[0].rank, 1);

    let rank = app
        .leaderboard
        .get_user_rank(runner_up, Timeframe::AllTime, Category::Points)
        .unwrap();
    assert_eq!(rank, 2);
}

#[test]
fn test_completion_is_awarded_exactly_once() {
    let app = EcoTrack::in_memory();
    let challenge = water_challenge(&app, 100);
    let user = Uuid::new_v4();

    app.participations.join_challenge(challenge.id, user).unwrap();
    app.participations
        .record_progress(challenge.id, user, 600.0)
        .unwrap();
    app.participations
        .record_progress(challenge.id, user, 700.0)
        .unwrap();
    app.participations
        .record_progress(challenge.id, user, 100.0)
        .unwrap();

    let profile = app.profiles.get_profile(user).unwrap().unwrap();
    assert_eq!(profile.stats.challenges_completed, 1);
    assert_eq!(profile.stats.total_points, 100);

    let row = app
        .participations
        .get_user_challenge_participation(challenge.id, user)
        .unwrap()
        .unwrap();
    assert!(row.completed);
    assert_eq!(row.progress, 100.0);
}

#[test]
fn test_progress_on_unjoined_challenge_fails_precondition() {
    let app = EcoTrack::in_memory();
    let challenge = water_challenge(&app, 100);

    let err = app
        .participations
        .record_progress(challenge.id, Uuid::new_v4(), 10.0)
        .unwrap_err();
    assert!(matches!(err, ParticipationError::PreconditionFailed(_)));
}

#[test]
fn test_participations_listing_per_user() {
    let app = EcoTrack::in_memory();
    let a = water_challenge(&app, 50);
    let b = water_challenge(&app, 75);
    let user = Uuid::new_v4();

    app.participations.join_challenge(a.id, user).unwrap();
    app.participations.join_challenge(b.id, user).unwrap();

    let mine = app.participations.get_user_participations(user).unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|p| p.user_id == user));

    assert!(app
        .participations
        .get_user_challenge_participation(a.id, Uuid::new_v4())
        .unwrap()
        .is_none());
}
