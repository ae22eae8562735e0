use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::models::{FoodHistoryItem, Role, User};

/// Full own-profile view, hash stripped.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub class_code: String,
    pub role: Role,
    pub points: i64,
    pub level: u32,
    pub badges: Vec<String>,
    pub streak_days: u32,
    pub quiz_correct_answers: u32,
    pub food_history: Vec<FoodHistoryItem>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            class_code: user.class_code.clone(),
            role: user.role,
            points: user.points,
            level: user.level,
            badges: user.badges.clone(),
            streak_days: user.streak_days,
            quiz_correct_answers: user.quiz_correct_answers,
            food_history: user.food_history.clone(),
        }
    }
}

/// Compact listing for the admin overview.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub class_code: String,
    pub role: Role,
    pub points: i64,
    pub level: u32,
    pub badges: Vec<String>,
    pub streak_days: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_entry: Option<OffsetDateTime>,
}

/// Admin-only account provisioning request.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub class_code: String,
    #[serde(default)]
    pub role: Role,
}
