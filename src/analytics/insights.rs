//! Insight generation from weekly analytics.
//!
//! A fixed, ordered rule list over the aggregated week: each rule either
//! emits one insight or nothing, and the result is capped. Order is part of
//! the contract so the same data always yields the same insights.

use serde::{Deserialize, Serialize};

use crate::storage::config::AnalyticsSettings;

/// Insight flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// A win worth celebrating
    Achievement,
    /// A trend moving the wrong way
    Warning,
    /// Steady logging habits
    Consistency,
    /// A concrete suggestion
    Tip,
}

/// One generated insight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

/// Aggregated week context the rules evaluate against.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightContext {
    /// CO2 percent change, trailing week vs the one before
    pub co2_trend_pct: f64,
    /// Water percent change
    pub water_trend_pct: f64,
    /// Eco-score percent change
    pub eco_trend_pct: f64,
    /// Days with at least one meal in the last 7
    pub active_days_last_week: u32,
    /// Mean eco-score over active days of the last 7
    pub avg_eco_score_last_week: f64,
    /// Current daily logging streak
    pub streak_days: u32,
}

/// Run the rule list in order, capped at the configured maximum.
pub fn generate(ctx: &InsightContext, settings: &AnalyticsSettings) -> Vec<Insight> {
    let threshold = settings.trend_threshold_pct;
    let mut insights = Vec::new();

    if ctx.co2_trend_pct > threshold {
        insights.push(Insight {
            kind: InsightKind::Achievement,
            title: "Carbon trend up".to_string(),
            message: format!(
                "Your weekly CO2 trend climbed {:.0}% past the week before.",
                ctx.co2_trend_pct
            ),
        });
    } else if ctx.co2_trend_pct < -threshold {
        insights.push(Insight {
            kind: InsightKind::Warning,
            title: "Carbon trend down".to_string(),
            message: format!(
                "Your weekly CO2 trend dropped {:.0}% below the week before.",
                ctx.co2_trend_pct.abs()
            ),
        });
    }

    if ctx.water_trend_pct > threshold {
        insights.push(Insight {
            kind: InsightKind::Achievement,
            title: "Water trend up".to_string(),
            message: format!(
                "Your weekly water trend climbed {:.0}% past the week before.",
                ctx.water_trend_pct
            ),
        });
    } else if ctx.water_trend_pct < -threshold {
        insights.push(Insight {
            kind: InsightKind::Warning,
            title: "Water trend down".to_string(),
            message: format!(
                "Your weekly water trend dropped {:.0}% below the week before.",
                ctx.water_trend_pct.abs()
            ),
        });
    }

    if ctx.active_days_last_week >= 5 {
        insights.push(Insight {
            kind: InsightKind::Consistency,
            title: "Consistent tracking".to_string(),
            message: format!(
                "You logged meals on {} of the last 7 days. Keep it up!",
                ctx.active_days_last_week
            ),
        });
    }

    if ctx.active_days_last_week > 0
        && ctx.avg_eco_score_last_week < settings.low_eco_score_threshold
    {
        insights.push(Insight {
            kind: InsightKind::Tip,
            title: "Room to improve".to_string(),
            message: format!(
                "Your eco-score averaged {:.0} this week. Swapping one meat dish for a plant-based one usually moves it most.",
                ctx.avg_eco_score_last_week
            ),
        });
    }

    if ctx.eco_trend_pct > threshold {
        insights.push(Insight {
            kind: InsightKind::Achievement,
            title: "Eco-score climbing".to_string(),
            message: format!(
                "Your average eco-score rose {:.0}% over last week.",
                ctx.eco_trend_pct
            ),
        });
    }

    if ctx.streak_days >= 7 {
        insights.push(Insight {
            kind: InsightKind::Achievement,
            title: "Streak milestone".to_string(),
            message: format!("{} days of logging in a row.", ctx.streak_days),
        });
    }

    insights.truncate(settings.max_insights);
    insights
}
