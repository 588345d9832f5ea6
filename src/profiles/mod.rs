//! User profiles: stats aggregate, goals, badges and unlock rules.

pub mod badges;
pub mod store;
pub mod types;

pub use badges::{BadgeKind, BadgeRuleEngine};
pub use store::{ProfileError, ProfileStore};
pub use types::{Badge, BadgeCategory, StatsPatch, UserGoals, UserProfile, UserStats};
