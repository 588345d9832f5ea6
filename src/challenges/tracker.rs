//! Per-user challenge participation state.
//!
//! Write flow per mutation: update the participation row, then let the
//! profile store recompute dependent aggregates and badge rules. Completion
//! latches; daily progress is idempotent.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::streak;
use super::types::{Challenge, ChallengeParticipation};
use crate::profiles::store::{ProfileError, ProfileStore};
use crate::storage::store::{collections, RecordStore, StorageError};

/// Tracks who participates in which challenge, and how far along they are.
#[derive(Clone)]
pub struct ParticipationTracker {
    store: Arc<RecordStore>,
    profiles: ProfileStore,
}

impl ParticipationTracker {
    /// Create a new participation tracker.
    pub fn new(store: Arc<RecordStore>, profiles: ProfileStore) -> Self {
        Self { store, profiles }
    }

    /// Join a challenge.
    ///
    /// Fails with [`ParticipationError::AlreadyParticipating`] when a
    /// participation for the pair exists; the challenge's participant set is
    /// untouched by the failed attempt. Otherwise the user is appended to
    /// the participant set and a zero-progress participation is created.
    pub fn join_challenge(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
    ) -> Result<ChallengeParticipation, ParticipationError> {
        let mut challenges: Vec<Challenge> = self.store.read_collection(collections::CHALLENGES)?;
        let challenge = challenges
            .iter_mut()
            .find(|c| c.id == challenge_id)
            .ok_or(ParticipationError::ChallengeNotFound(challenge_id))?;

        let mut rows: Vec<ChallengeParticipation> =
            self.store.read_collection(collections::PARTICIPATIONS)?;
        if rows
            .iter()
            .any(|p| p.challenge_id == challenge_id && p.user_id == user_id)
        {
            return Err(ParticipationError::AlreadyParticipating {
                challenge_id,
                user_id,
            });
        }

        let participation = ChallengeParticipation::new(challenge_id, user_id);
        rows.push(participation.clone());
        self.store
            .write_collection(collections::PARTICIPATIONS, &rows)?;

        if !challenge.participants.contains(&user_id) {
            challenge.participants.push(user_id);
        }
        self.store
            .write_collection(collections::CHALLENGES, &challenges)?;

        info!(challenge = %challenge_id, user = %user_id, "user joined challenge");
        Ok(participation)
    }

    /// Idempotently mark one calendar day completed or not, then rebuild
    /// both streak counters from the daily map.
    ///
    /// Fails with [`ParticipationError::PreconditionFailed`] when the user
    /// has no participation for the challenge.
    pub fn update_daily_progress(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        completed: bool,
    ) -> Result<ChallengeParticipation, ParticipationError> {
        let mut rows: Vec<ChallengeParticipation> =
            self.store.read_collection(collections::PARTICIPATIONS)?;

        let row = rows
            .iter_mut()
            .find(|p| p.challenge_id == challenge_id && p.user_id == user_id)
            .ok_or_else(|| {
                ParticipationError::PreconditionFailed(format!(
                    "no participation for challenge {challenge_id} and user {user_id}"
                ))
            })?;

        row.daily_progress.insert(date, completed);

        let today = Utc::now().date_naive();
        row.current_streak = streak::current_streak(&row.daily_progress, today);
        row.longest_streak = streak::longest_streak(&row.daily_progress).max(row.current_streak);

        let updated = row.clone();
        self.store
            .write_collection(collections::PARTICIPATIONS, &rows)?;

        debug!(
            challenge = %challenge_id,
            user = %user_id,
            %date,
            completed,
            current_streak = updated.current_streak,
            "daily progress updated"
        );
        Ok(updated)
    }

    /// Record the current value toward the challenge target.
    ///
    /// Progress is `min(100, value / target * 100)`. The first time it
    /// reaches 100 the completed flag latches, the profile is credited with
    /// the challenge's points, and badge rules run. Later updates move
    /// `current_value` but never un-complete.
    pub fn record_progress(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
        value: f64,
    ) -> Result<ChallengeParticipation, ParticipationError> {
        let challenges: Vec<Challenge> = self.store.read_collection(collections::CHALLENGES)?;
        let challenge = challenges
            .iter()
            .find(|c| c.id == challenge_id)
            .ok_or(ParticipationError::ChallengeNotFound(challenge_id))?;

        let mut rows: Vec<ChallengeParticipation> =
            self.store.read_collection(collections::PARTICIPATIONS)?;
        let row = rows
            .iter_mut()
            .find(|p| p.challenge_id == challenge_id && p.user_id == user_id)
            .ok_or_else(|| {
                ParticipationError::PreconditionFailed(format!(
                    "no participation for challenge {challenge_id} and user {user_id}"
                ))
            })?;

        row.current_value = value;
        if row.completed {
            row.progress = 100.0;
        } else {
            row.progress = (value / challenge.target_value * 100.0).clamp(0.0, 100.0);
        }

        let newly_completed = !row.completed && row.progress >= 100.0;
        if newly_completed {
            row.completed = true;
        }

        let updated = row.clone();
        self.store
            .write_collection(collections::PARTICIPATIONS, &rows)?;

        if newly_completed {
            info!(challenge = %challenge_id, user = %user_id, points = challenge.points, "challenge completed");
            self.profiles
                .apply_challenge_completion(user_id, challenge.points)?;
        }

        Ok(updated)
    }

    /// Get one user's participation in one challenge, `None` when absent.
    pub fn get_user_challenge_participation(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ChallengeParticipation>, ParticipationError> {
        let rows: Vec<ChallengeParticipation> =
            self.store.read_collection(collections::PARTICIPATIONS)?;
        Ok(rows
            .into_iter()
            .find(|p| p.challenge_id == challenge_id && p.user_id == user_id))
    }

    /// All participations for a user, in join order.
    pub fn get_user_participations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ChallengeParticipation>, ParticipationError> {
        let rows: Vec<ChallengeParticipation> =
            self.store.read_collection(collections::PARTICIPATIONS)?;
        Ok(rows.into_iter().filter(|p| p.user_id == user_id).collect())
    }
}

/// Participation errors.
#[derive(Debug, thiserror::Error)]
pub enum ParticipationError {
    #[error("challenge not found: {0}")]
    ChallengeNotFound(Uuid),

    #[error("user {user_id} already participates in challenge {challenge_id}")]
    AlreadyParticipating { challenge_id: Uuid, user_id: Uuid },

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
}
