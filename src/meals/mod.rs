//! Meal logging: records, footprint factors and derived stats.

pub mod factors;
pub mod ledger;
pub mod types;

pub use ledger::{MealError, MealLedger};
pub use types::{Meal, MealCategory, MealStats, NewMeal, WeeklyTrends};
