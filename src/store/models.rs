//! Canonical shapes of the persisted JSON records.
//!
//! The data files accrued legacy field spellings over time (`userId` next to
//! `user_id`, `ai_analysis` next to `ai_analysis_result`). Reads accept the
//! old spellings via serde aliases and fill missing fields with defaults;
//! writes always emit the canonical form.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

time::serde::format_description!(date_fmt, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Self::Student
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Default for MealType {
    fn default() -> Self {
        Self::Snack
    }
}

impl MealType {
    /// Lenient parse used for form input; anything unrecognized is a snack.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Snack,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionSource {
    ExternalLookup,
    LocalDatabase,
    Fallback,
}

/// Denormalized per-user cache of logged entries, for quick display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodHistoryItem {
    pub id: Uuid,
    pub food_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub points_earned: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub class_code: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub points: i64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default, with = "date_fmt::option")]
    pub last_entry_date: Option<Date>,
    #[serde(default)]
    pub quiz_correct_answers: u32,
    #[serde(default)]
    pub food_history: Vec<FoodHistoryItem>,
}

fn default_level() -> u32 {
    1
}

/// Per-100g nutrition scaled to the logged quantity, frozen into the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub detected_food: String,
    pub source: NutritionSource,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugars: f64,
    pub salt: f64,
    #[serde(default)]
    pub nutriscore: Option<String>,
}

/// Point-in-time scoring snapshot. Never recomputed after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub ai_score: u8,
    pub ai_feedback: String,
    #[serde(default)]
    pub ai_suggestions: Vec<String>,
    pub nutrition_info: NutritionInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: Uuid,
    #[serde(alias = "userId")]
    pub user_id: Uuid,
    pub food_name: String,
    pub quantity: f64,
    #[serde(default)]
    pub meal_type: MealType,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(alias = "ai_analysis")]
    pub ai_analysis_result: AiAnalysis,
    pub points_earned: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<QuizOption>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionFile {
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: ChatSender,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    #[serde(alias = "userId")]
    pub user_id: Uuid,
    #[serde(default, alias = "adminId")]
    pub admin_id: Option<Uuid>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default = "default_conversation_status")]
    pub status: String,
    #[serde(alias = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

fn default_conversation_status() -> String {
    "open".into()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatFile {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqFile {
    #[serde(default)]
    pub faqs: Vec<FaqItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_entry() -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            food_name: "appel".into(),
            quantity: 120.0,
            meal_type: MealType::Snack,
            notes: Some("na het sporten".into()),
            timestamp: datetime!(2026-03-14 12:30:00 UTC),
            image_url: Some("/uploads/1234-appel.jpg".into()),
            ai_analysis_result: AiAnalysis {
                ai_score: 8,
                ai_feedback: "appel is vezelrijk.".into(),
                ai_suggestions: vec!["Probeer gevarieerd te eten.".into()],
                nutrition_info: NutritionInfo {
                    detected_food: "appel".into(),
                    source: NutritionSource::LocalDatabase,
                    calories: 62,
                    protein: 0.4,
                    carbs: 16.6,
                    fat: 0.2,
                    fiber: 2.9,
                    sugars: 12.5,
                    salt: 0.001,
                    nutriscore: Some("a".into()),
                },
            },
            points_earned: 20,
        }
    }

    #[test]
    fn food_entry_round_trips_exactly() {
        let entry = sample_entry();
        let json = serde_json::to_string_pretty(&entry).unwrap();
        let back: FoodEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, entry.id);
        assert_eq!(back.timestamp, entry.timestamp);
        assert_eq!(back.quantity, entry.quantity);
        assert_eq!(back.ai_analysis_result.ai_score, 8);
        assert_eq!(back.ai_analysis_result.nutrition_info.salt, 0.001);
        assert_eq!(
            back.ai_analysis_result.ai_suggestions,
            entry.ai_analysis_result.ai_suggestions
        );
        assert_eq!(back.image_url, entry.image_url);
    }

    #[test]
    fn legacy_field_spellings_normalize_on_read() {
        let id = Uuid::new_v4();
        let raw = serde_json::json!({
            "id": Uuid::new_v4(),
            "userId": id,
            "food_name": "boterham",
            "quantity": 100.0,
            "timestamp": "2026-03-14T12:30:00Z",
            "ai_analysis": {
                "ai_score": 5,
                "ai_feedback": "Je hebt boterham gelogd.",
                "nutrition_info": {
                    "detected_food": "boterham",
                    "source": "fallback",
                    "calories": 150,
                    "protein": 2.0,
                    "carbs": 25.0,
                    "fat": 5.0,
                    "fiber": 1.0,
                    "sugars": 5.0,
                    "salt": 0.3
                }
            },
            "points_earned": 10
        });
        let entry: FoodEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.user_id, id);
        assert_eq!(entry.meal_type, MealType::Snack);
        assert!(entry.ai_analysis_result.ai_suggestions.is_empty());
        // Canonical spelling on the way back out.
        let out = serde_json::to_value(&entry).unwrap();
        assert!(out.get("user_id").is_some());
        assert!(out.get("ai_analysis_result").is_some());
    }

    #[test]
    fn user_defaults_fill_missing_fields() {
        let raw = serde_json::json!({
            "id": Uuid::new_v4(),
            "username": "emma",
            "password_hash": "$argon2id$fake"
        });
        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.points, 0);
        assert_eq!(user.level, 1);
        assert_eq!(user.role, Role::Student);
        assert!(user.badges.is_empty());
        assert!(user.last_entry_date.is_none());
    }

    #[test]
    fn meal_type_parses_leniently() {
        assert_eq!(MealType::parse_or_default("Lunch"), MealType::Lunch);
        assert_eq!(MealType::parse_or_default("brunch"), MealType::Snack);
        assert_eq!(MealType::parse_or_default(""), MealType::Snack);
    }
}
