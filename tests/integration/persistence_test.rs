//! Persistence across process lifetimes and medium failure handling.

use tempfile::TempDir;
use uuid::Uuid;

use ecotrack::meals::{MealCategory, NewMeal};
use ecotrack::storage::{AppConfig, SqliteMedium, StorageMedium};
use ecotrack::EcoTrack;

fn open_at(dir: &TempDir) -> EcoTrack {
    let medium = SqliteMedium::open(dir.path().join("ecotrack.db")).unwrap();
    EcoTrack::new(Box::new(medium), AppConfig::default())
}

#[test]
fn test_meals_survive_reopen_with_exact_values() {
    let dir = TempDir::new().unwrap();
    let user = Uuid::new_v4();

    let written = {
        let app = open_at(&dir);
        app.meals
            .add_meal(
                user,
                NewMeal {
                    name: "Chickpea curry".to_string(),
                    ingredients: vec![
                        "chickpeas".to_string(),
                        "rice".to_string(),
                        "tomato".to_string(),
                    ],
                    category: MealCategory::Dinner,
                },
            )
            .unwrap()
    };

    let app = open_at(&dir);
    let read = app.meals.get_meal(written.id).unwrap().unwrap();

    assert_eq!(read.name, written.name);
    assert_eq!(read.category, written.category);
    assert_eq!(read.eco_score, written.eco_score);
    assert!((read.carbon_kg - written.carbon_kg).abs() < 0.005);
    assert!((read.water_l - written.water_l).abs() < 0.005);
    assert_eq!(read.created_at, written.created_at);
}

#[test]
fn test_profiles_and_participations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let user = Uuid::new_v4();

    let challenge_id = {
        let app = open_at(&dir);
        app.profiles.ensure_profile(user, "Jo").unwrap();
        let challenge = app
            .challenges
            .create_challenge(
                user,
                ecotrack::challenges::NewChallenge {
                    title: "Zero waste week".to_string(),
                    description: "No packaging".to_string(),
                    challenge_type: ecotrack::challenges::ChallengeType::ZeroWaste,
                    target_value: 7.0,
                    unit: "days".to_string(),
                    duration_days: 7,
                    difficulty: ecotrack::challenges::Difficulty::Hard,
                    points: 200,
                    instructions: vec![],
                    tips: vec![],
                    rules: vec![],
                },
            )
            .unwrap();
        app.participations.join_challenge(challenge.id, user).unwrap();
        challenge.id
    };

    let app = open_at(&dir);
    let profile = app.profiles.get_profile(user).unwrap().unwrap();
    assert_eq!(profile.display_name, "Jo");

    let row = app
        .participations
        .get_user_challenge_participation(challenge_id, user)
        .unwrap()
        .unwrap();
    assert_eq!(row.user_id, user);
    assert!(!row.completed);
}

#[test]
fn test_corrupt_collection_does_not_poison_the_app() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ecotrack.db");

    {
        let medium = SqliteMedium::open(&path).unwrap();
        medium.set("meals", b"\x00\x01 definitely not json").unwrap();
    }

    let medium = SqliteMedium::open(&path).unwrap();
    let app = EcoTrack::new(Box::new(medium), AppConfig::default());
    let user = Uuid::new_v4();

    // Corrupt bytes read as empty; a fresh write recovers the collection.
    assert!(app.meals.get_user_meals(user).unwrap().is_empty());
    app.meals
        .add_meal(
            user,
            NewMeal {
                name: "Fresh start".to_string(),
                ingredients: vec!["salmon".to_string()],
                category: MealCategory::Lunch,
            },
        )
        .unwrap();
    assert_eq!(app.meals.get_user_meals(user).unwrap().len(), 1);
}

#[test]
fn test_interleaved_writers_last_writer_wins() {
    // Two execution contexts over one medium provide no mutual exclusion:
    // a writer holding a stale read replaces the other's write wholesale.
    use ecotrack::meals::types::Meal;
    use ecotrack::storage::collections;

    let dir = TempDir::new().unwrap();
    let user = Uuid::new_v4();

    let first = open_at(&dir);
    let second = open_at(&dir);

    // Context one reads the (empty) collection ...
    let mut stale: Vec<Meal> = first
        .store()
        .read_collection(collections::MEALS)
        .unwrap();

    // ... context two logs a meal in the meantime ...
    second
        .meals
        .add_meal(
            user,
            NewMeal {
                name: "From second".to_string(),
                ingredients: vec!["pasta".to_string()],
                category: MealCategory::Dinner,
            },
        )
        .unwrap();

    // ... and context one writes back its stale view plus its own meal.
    stale.push(Meal::new(
        user,
        "From first".to_string(),
        vec!["rice".to_string()],
        MealCategory::Lunch,
        1.0,
        625.0,
        130,
    ));
    first
        .store()
        .write_collection(collections::MEALS, &stale)
        .unwrap();

    let fresh = open_at(&dir);
    let meals = fresh.meals.get_user_meals(user).unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].name, "From first");
}
