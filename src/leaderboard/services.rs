use std::collections::HashMap;

use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{LeaderboardResponse, LeaderboardRow, LeaderboardStats};
use crate::store::models::{FoodEntry, User};

/// Joins users with their entry history into a ranked list. Recomputed in
/// full on every call; `last_updated` is simply the request time.
///
/// Ranks are assigned over the globally sorted list before class filtering,
/// so they reflect school-wide standing. Ties on points keep their prior
/// order (stable sort); the tiebreak is deliberately left unspecified.
pub fn build_leaderboard(
    users: &[User],
    entries: &[FoodEntry],
    healthy_cutoff: u8,
    is_admin: bool,
    requester_class: &str,
    now: OffsetDateTime,
) -> LeaderboardResponse {
    let mut per_user: HashMap<Uuid, Vec<&FoodEntry>> = HashMap::new();
    for entry in entries {
        per_user.entry(entry.user_id).or_default().push(entry);
    }

    let mut sorted: Vec<&User> = users.iter().collect();
    sorted.sort_by(|a, b| b.points.cmp(&a.points));

    let leaderboard: Vec<LeaderboardRow> = sorted
        .iter()
        .enumerate()
        .map(|(index, user)| {
            let user_entries = per_user.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
            let total_entries = user_entries.len();
            let healthy_entries = user_entries
                .iter()
                .filter(|e| e.ai_analysis_result.ai_score >= healthy_cutoff)
                .count();
            let healthy_percentage = if total_entries > 0 {
                ((healthy_entries as f64 / total_entries as f64) * 100.0).round() as u32
            } else {
                0
            };
            let last_entry = user_entries.iter().map(|e| e.timestamp).max();

            LeaderboardRow {
                rank: index + 1,
                id: user.id,
                username: user.username.clone(),
                points: user.points,
                level: user.level,
                badges: user.badges.clone(),
                streak_days: user.streak_days,
                stats: LeaderboardStats {
                    total_entries,
                    healthy_entries,
                    healthy_percentage,
                    last_entry,
                },
            }
        })
        .filter(|row| {
            if is_admin {
                return true;
            }
            users
                .iter()
                .find(|u| u.id == row.id)
                .map(|u| u.class_code.eq_ignore_ascii_case(requester_class))
                .unwrap_or(false)
        })
        .collect();

    let total_users = leaderboard.len();
    LeaderboardResponse {
        leaderboard,
        last_updated: now,
        total_users,
    }
}
