//! Application configuration.
//!
//! Savings baselines, leaderboard week start and analytics thresholds are
//! product tuning knobs, not facts about the world, so they live in the
//! config file rather than in code.

use std::path::PathBuf;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// First day of the leaderboard week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Week starts on Monday (default)
    #[default]
    Monday,
    /// Week starts on Sunday
    Sunday,
}

impl WeekStart {
    /// The chrono weekday this setting maps to.
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekStart::Monday => write!(f, "Monday"),
            WeekStart::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Per-meal savings baselines
    pub baselines: BaselineSettings,
    /// Leaderboard settings
    pub leaderboard: LeaderboardSettings,
    /// Analytics settings
    pub analytics: AnalyticsSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            baselines: BaselineSettings::default(),
            leaderboard: LeaderboardSettings::default(),
            analytics: AnalyticsSettings::default(),
        }
    }
}

/// Per-meal baselines that CO2/water savings are measured against.
///
/// Savings are relative to a fixed "average meal", not a true
/// counterfactual. The defaults are the source product's figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineSettings {
    /// Average meal carbon footprint in kg CO2e
    pub co2_kg_per_meal: f64,
    /// Average meal water usage in liters
    pub water_l_per_meal: f64,
}

impl Default for BaselineSettings {
    fn default() -> Self {
        Self {
            co2_kg_per_meal: 5.0,
            water_l_per_meal: 2000.0,
        }
    }
}

/// Leaderboard-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    /// First day of the "this week" timeframe
    pub week_starts_on: WeekStart,
    /// Entry count returned when a query passes limit 0
    pub default_limit: usize,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            week_starts_on: WeekStart::Monday,
            default_limit: 10,
        }
    }
}

/// Analytics-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Maximum insights emitted per analytics query
    pub max_insights: usize,
    /// Percent change that counts as a meaningful weekly trend
    pub trend_threshold_pct: f64,
    /// Seven-day mean eco-score below which a tip is emitted
    pub low_eco_score_threshold: f64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            max_insights: 5,
            trend_threshold_pct: 10.0,
            low_eco_score_threshold: 70.0,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "ecotrack", "EcoTrack")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Get the default database path.
pub fn get_database_path() -> PathBuf {
    get_data_dir().join("ecotrack.db")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = get_data_dir();

    Ok(config)
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
