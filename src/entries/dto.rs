use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::models::FoodEntry;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Created-entry response: the stored entry plus the gamification outcome.
#[derive(Debug, Serialize)]
pub struct CreatedEntryResponse {
    #[serde(flatten)]
    pub entry: FoodEntry,
    pub new_badges: Vec<String>,
    pub total_points: i64,
    pub message: String,
}
