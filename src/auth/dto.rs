use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::models::{Role, User};

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub class_code: String,
    pub password: String,
}

/// Public part of the user returned to the client. The password hash never
/// leaves the store layer.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub class_code: String,
    pub role: Role,
    pub points: i64,
    pub level: u32,
    pub badges: Vec<String>,
    pub streak_days: u32,
}

impl From<&User> for PublicUser {
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
        }
    }
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}
