//! Challenge and participation types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Challenge type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    /// Reduce carbon footprint
    CarbonReduction,
    /// Reduce water usage
    WaterSaving,
    /// Eat plant-based meals
    PlantBased,
    /// Avoid packaging waste
    ZeroWaste,
    /// Eat locally sourced food
    LocalFood,
}

impl ChallengeType {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChallengeType::CarbonReduction => "Carbon Reduction",
            ChallengeType::WaterSaving => "Water Saving",
            ChallengeType::PlantBased => "Plant Based",
            ChallengeType::ZeroWaste => "Zero Waste",
            ChallengeType::LocalFood => "Local Food",
        }
    }
}

impl std::fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Challenge difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Accessible to anyone
    Easy,
    /// Takes some planning
    #[default]
    Medium,
    /// A real commitment
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// A sustainability challenge.
///
/// Never physically deleted; only the active flag toggles and the
/// participant set grows. Older stored records used `category` and `target`
/// for the type tag and target value; both legacy names are accepted on
/// read and only the canonical names are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// What the challenge is about
    pub description: String,
    /// Type tag
    #[serde(alias = "category")]
    pub challenge_type: ChallengeType,
    /// Numeric target to reach
    #[serde(alias = "target")]
    pub target_value: f64,
    /// Unit the target is measured in
    pub unit: String,
    /// Duration in days
    pub duration_days: u32,
    /// Difficulty rating
    pub difficulty: Difficulty,
    /// Points awarded on completion
    pub points: u32,
    /// Whether the challenge accepts participants
    pub active: bool,
    /// User who created the challenge
    pub created_by: Uuid,
    /// Step-by-step instructions
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Helpful tips
    #[serde(default)]
    pub tips: Vec<String>,
    /// Participation rules
    #[serde(default)]
    pub rules: Vec<String>,
    /// Participant user ids; each id appears at most once
    #[serde(default)]
    pub participants: Vec<Uuid>,
    /// When the challenge was created
    pub created_at: DateTime<Utc>,
}

impl Challenge {
    /// Create a challenge from its input.
    pub fn new(created_by: Uuid, input: NewChallenge) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            challenge_type: input.challenge_type,
            target_value: input.target_value,
            unit: input.unit,
            duration_days: input.duration_days,
            difficulty: input.difficulty,
            points: input.points,
            active: true,
            created_by,
            instructions: input.instructions,
            tips: input.tips,
            rules: input.rules,
            participants: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a challenge.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChallenge {
    pub title: String,
    pub description: String,
    pub challenge_type: ChallengeType,
    pub target_value: f64,
    pub unit: String,
    pub duration_days: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub points: u32,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
}

/// One user's participation in one challenge.
///
/// At most one participation exists per (challenge, user) pair. The
/// completed flag is monotone and the longest streak never trails the
/// current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeParticipation {
    /// Unique identifier
    pub id: Uuid,
    /// Challenge joined
    pub challenge_id: Uuid,
    /// Participating user
    pub user_id: Uuid,
    /// When the user joined
    pub joined_at: DateTime<Utc>,
    /// Progress percentage, clamped 0-100
    pub progress: f64,
    /// Current value toward the target
    pub current_value: f64,
    /// Whether the target has been reached; latches on
    pub completed: bool,
    /// Consecutive completed days ending at (or one day before) today
    pub current_streak: u32,
    /// Longest run of consecutive completed days
    pub longest_streak: u32,
    /// Sparse map from calendar date to "day completed"
    #[serde(default)]
    pub daily_progress: BTreeMap<NaiveDate, bool>,
}

impl ChallengeParticipation {
    /// Create a zero-progress participation for a join.
    pub fn new(challenge_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            challenge_id,
            user_id,
            joined_at: Utc::now(),
            progress: 0.0,
            current_value: 0.0,
            completed: false,
            current_streak: 0,
            longest_streak: 0,
            daily_progress: BTreeMap::new(),
        }
    }
}
