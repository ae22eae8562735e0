use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Typed leaderboard contract; no ad hoc object literals at the boundary.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardStats {
    pub total_entries: usize,
    pub healthy_entries: usize,
    pub healthy_percentage: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_entry: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    /// Position in the global points ordering, assigned before any class
    /// filtering. A class-scoped view may show non-contiguous ranks.
    pub rank: usize,
    pub id: Uuid,
    pub username: String,
    pub points: i64,
    pub level: u32,
    pub badges: Vec<String>,
    pub streak_days: u32,
    pub stats: LeaderboardStats,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardRow>,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
    pub total_users: usize,
}
