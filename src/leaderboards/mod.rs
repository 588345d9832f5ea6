//! Leaderboard rankings derived from profile stats.

pub mod rankings;

pub use rankings::{
    Category, LeaderboardEntry, LeaderboardError, LeaderboardIndex, LeaderboardQuery, Timeframe,
};
