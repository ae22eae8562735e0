use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NutritionConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Single source of truth for the point table and badge thresholds.
///
/// Injected into the scoring engine and badge evaluator at construction so
/// the numbers live in exactly one place.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Flat award for the act of logging, always granted.
    pub points_base: i64,
    /// Bonus stacked on top of the base, per score tier.
    pub bonus_healthy: i64,
    pub bonus_neutral: i64,
    pub bonus_unhealthy: i64,
    /// Default award per correct quiz answer when a question carries none.
    pub points_per_correct_answer: i64,
    /// ai_score at or above which an entry counts as healthy.
    pub healthy_score: u8,
    /// ai_score at or below which an entry counts as unhealthy.
    pub unhealthy_score: u8,
    /// Leaderboard cutoff for the healthy-entries statistic.
    pub leaderboard_healthy_cutoff: u8,
    /// Points needed per level.
    pub level_up_points: i64,
    pub badge_healthy_entries: usize,
    pub badge_distinct_foods: usize,
    pub badge_streak_days: u32,
    pub badge_total_entries: usize,
    pub badge_photo_entries: usize,
    pub badge_quiz_correct: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_base: 10,
            bonus_healthy: 10,
            bonus_neutral: 0,
            bonus_unhealthy: -5,
            points_per_correct_answer: 10,
            healthy_score: 8,
            unhealthy_score: 3,
            leaderboard_healthy_cutoff: 7,
            level_up_points: 100,
            badge_healthy_entries: 5,
            badge_distinct_foods: 5,
            badge_streak_days: 7,
            badge_total_entries: 20,
            badge_photo_entries: 5,
            badge_quiz_correct: 10,
        }
    }
}

impl ScoringConfig {
    /// Level derived from cumulative points.
    pub fn level_for(&self, points: i64) -> u32 {
        (points.max(0) / self.level_up_points) as u32 + 1
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub jwt: JwtConfig,
    pub nutrition: NutritionConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "snackcheck".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "snackcheck-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
        };
        let nutrition = NutritionConfig {
            base_url: std::env::var("OFF_BASE_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org".into()),
            timeout_secs: std::env::var("OFF_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5),
        };
        Ok(Self {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".into())
                .into(),
            uploads_dir: std::env::var("UPLOADS_DIR")
                .unwrap_or_else(|_| "uploads".into())
                .into(),
            jwt,
            nutrition,
            scoring: ScoringConfig::default(),
        })
    }
}
