use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::models::Role;

/// JWT payload. Role and class code travel in the token so visibility
/// decisions need no extra user lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,         // user ID
    pub role: Role,        // student, teacher or admin
    pub class_code: String, // cohort for leaderboard scoping
    pub iat: usize,        // issued at (unix timestamp)
    pub exp: usize,        // expires at (unix timestamp)
    pub iss: String,       // issuer
    pub aud: String,       // audience
}
