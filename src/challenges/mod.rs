//! Sustainability challenges: catalog, participation and streaks.

pub mod catalog;
pub mod streak;
pub mod tracker;
pub mod types;

pub use catalog::{CatalogError, ChallengeCatalog};
pub use tracker::{ParticipationError, ParticipationTracker};
pub use types::{Challenge, ChallengeParticipation, ChallengeType, Difficulty, NewChallenge};
