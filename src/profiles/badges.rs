//! Badge kinds and the declarative unlock rule table.
//!
//! Every rule is a threshold predicate over the current stats aggregate,
//! keyed by a unique badge name. Rules are evaluated in the fixed table
//! order and fire at most once per profile. Evaluation is pure: running it
//! again over unchanged stats unlocks nothing.

use chrono::Utc;
use uuid::Uuid;

use super::types::{Badge, BadgeCategory, UserProfile, UserStats};

/// The fixed set of badge kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    /// First meal tracked
    FirstMeal,
    /// Seven-day logging streak
    StreakWeek,
    /// Thirty-day logging streak
    StreakMonth,
    /// 50 kg CO2 saved
    CarbonCutter,
    /// 10,000 L water saved
    WaterGuardian,
    /// First challenge completed
    FirstChallenge,
    /// Five challenges completed
    ChallengeChampion,
    /// Reached level 5
    LevelFive,
    /// Reached level 10
    LevelTen,
}

impl BadgeKind {
    /// Badge name; unique per profile.
    pub fn name(&self) -> &'static str {
        match self {
            BadgeKind::FirstMeal => "First Steps",
            BadgeKind::StreakWeek => "Week Warrior",
            BadgeKind::StreakMonth => "Habit Builder",
            BadgeKind::CarbonCutter => "Carbon Cutter",
            BadgeKind::WaterGuardian => "Water Guardian",
            BadgeKind::FirstChallenge => "Challenger",
            BadgeKind::ChallengeChampion => "Challenge Champion",
            BadgeKind::LevelFive => "Rising Star",
            BadgeKind::LevelTen => "Eco Hero",
        }
    }

    /// What earned the badge.
    pub fn description(&self) -> &'static str {
        match self {
            BadgeKind::FirstMeal => "Tracked your first meal",
            BadgeKind::StreakWeek => "Logged meals seven days in a row",
            BadgeKind::StreakMonth => "Logged meals thirty days in a row",
            BadgeKind::CarbonCutter => "Saved 50 kg of CO2",
            BadgeKind::WaterGuardian => "Saved 10,000 liters of water",
            BadgeKind::FirstChallenge => "Completed your first challenge",
            BadgeKind::ChallengeChampion => "Completed five challenges",
            BadgeKind::LevelFive => "Reached level 5",
            BadgeKind::LevelTen => "Reached level 10",
        }
    }

    /// Icon glyph.
    pub fn icon(&self) -> &'static str {
        match self {
            BadgeKind::FirstMeal => "🌱",
            BadgeKind::StreakWeek => "🔥",
            BadgeKind::StreakMonth => "📅",
            BadgeKind::CarbonCutter => "🌍",
            BadgeKind::WaterGuardian => "💧",
            BadgeKind::FirstChallenge => "🎯",
            BadgeKind::ChallengeChampion => "🏆",
            BadgeKind::LevelFive => "⭐",
            BadgeKind::LevelTen => "🌟",
        }
    }

    /// Category tag.
    pub fn category(&self) -> BadgeCategory {
        match self {
            BadgeKind::FirstMeal => BadgeCategory::Meals,
            BadgeKind::StreakWeek | BadgeKind::StreakMonth => BadgeCategory::Streaks,
            BadgeKind::CarbonCutter | BadgeKind::WaterGuardian => BadgeCategory::Impact,
            BadgeKind::FirstChallenge | BadgeKind::ChallengeChampion => BadgeCategory::Challenges,
            BadgeKind::LevelFive | BadgeKind::LevelTen => BadgeCategory::Levels,
        }
    }

    /// Materialize a badge record earned now.
    pub fn to_badge(self) -> Badge {
        Badge {
            id: Uuid::new_v4(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            icon: self.icon().to_string(),
            category: self.category(),
            earned_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One unlock rule: a badge kind and its threshold predicate.
pub struct BadgeRule {
    /// Badge the rule unlocks
    pub kind: BadgeKind,
    /// Threshold predicate over the current aggregate
    pub unlocked: fn(&UserStats) -> bool,
}

/// The rule table, in evaluation order.
pub static BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        kind: BadgeKind::FirstMeal,
        unlocked: |stats| stats.total_meals >= 1,
    },
    BadgeRule {
        kind: BadgeKind::StreakWeek,
        unlocked: |stats| stats.streak_days >= 7,
    },
    BadgeRule {
        kind: BadgeKind::StreakMonth,
        unlocked: |stats| stats.streak_days >= 30,
    },
    BadgeRule {
        kind: BadgeKind::CarbonCutter,
        unlocked: |stats| stats.total_co2_saved_kg >= 50.0,
    },
    BadgeRule {
        kind: BadgeKind::WaterGuardian,
        unlocked: |stats| stats.total_water_saved_l >= 10_000.0,
    },
    BadgeRule {
        kind: BadgeKind::FirstChallenge,
        unlocked: |stats| stats.challenges_completed >= 1,
    },
    BadgeRule {
        kind: BadgeKind::ChallengeChampion,
        unlocked: |stats| stats.challenges_completed >= 5,
    },
    BadgeRule {
        kind: BadgeKind::LevelFive,
        unlocked: |stats| stats.level >= 5,
    },
    BadgeRule {
        kind: BadgeKind::LevelTen,
        unlocked: |stats| stats.level >= 10,
    },
];

/// Evaluates the rule table against a profile.
pub struct BadgeRuleEngine;

impl BadgeRuleEngine {
    /// Run every rule against the profile's current stats.
    ///
    /// Newly satisfied rules append their badge and achievement name;
    /// already-earned badges are skipped by name. Returns the kinds that
    /// fired this pass.
    pub fn evaluate(profile: &mut UserProfile) -> Vec<BadgeKind> {
        let mut unlocked = Vec::new();

        for rule in BADGE_RULES {
            if profile.has_badge(rule.kind.name()) {
                continue;
            }
            if (rule.unlocked)(&profile.stats) {
                profile.badges.push(rule.kind.to_badge());
                profile.stats.achievements.push(rule.kind.name().to_string());
                unlocked.push(rule.kind);
            }
        }

        unlocked
    }
}
