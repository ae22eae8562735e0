use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::nutrition::NutritionResolver;
use crate::scoring::{BadgeEvaluator, ScoringEngine};
use crate::state::AppState;
use crate::store::models::{AiAnalysis, FoodEntry, FoodHistoryItem, MealType, User};

pub struct UploadedImage {
    pub filename: String,
    pub body: Bytes,
}

pub struct NewEntryInput {
    pub food_name: String,
    pub quantity: f64,
    pub meal_type: MealType,
    pub notes: Option<String>,
    /// Label supplied by the upstream image classifier, if any.
    pub detected_food: Option<String>,
    pub image: Option<UploadedImage>,
}

#[derive(Debug)]
pub struct SubmissionResult {
    pub entry: FoodEntry,
    pub new_badges: Vec<String>,
    pub total_points: i64,
}

/// Full submission pipeline: resolve nutrition, score, then update entry
/// and user state under the store's writer gate. The user must exist before
/// anything is written; a missing user leaves no partial state behind.
pub async fn submit_entry(
    state: &AppState,
    user_id: Uuid,
    input: NewEntryInput,
) -> ApiResult<SubmissionResult> {
    let food_name = input.food_name.trim().to_string();
    if food_name.is_empty() {
        return Err(ApiError::Validation("food_name is required".into()));
    }
    let quantity = if input.quantity > 0.0 {
        input.quantity
    } else {
        100.0
    };

    // The external lookup is the only network call; it runs before the
    // writer gate is taken so a slow lookup cannot stall other submissions.
    let detected = input.detected_food.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let resolver = NutritionResolver::new(state.nutrition.clone());
    let facts = resolver.resolve(detected, &food_name).await;
    let display_name = detected.unwrap_or(&food_name).to_string();

    let scoring_cfg = Arc::new(state.config.scoring.clone());
    let outcome = ScoringEngine::new(scoring_cfg.clone()).score(&display_name, &facts);
    let now = OffsetDateTime::now_utc();

    let txn = state.store.write().await;
    let mut users = txn.users().await?;
    let Some(user_idx) = users.iter().position(|u| u.id == user_id) else {
        return Err(ApiError::NotFound("User not found".into()));
    };

    let image_url = match input.image {
        Some(image) => Some(save_image(state, &image, now).await?),
        None => None,
    };

    let entry = FoodEntry {
        id: Uuid::new_v4(),
        user_id,
        food_name,
        quantity,
        meal_type: input.meal_type,
        notes: input.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        timestamp: now,
        image_url,
        ai_analysis_result: AiAnalysis {
            ai_score: outcome.ai_score,
            ai_feedback: outcome.feedback,
            ai_suggestions: outcome.suggestions,
            nutrition_info: facts.scale(&display_name, quantity),
        },
        points_earned: outcome.points_earned,
    };

    let mut entries = txn.entries().await?;
    entries.push(entry.clone());

    let user = &mut users[user_idx];
    // points_earned is added exactly once, at creation.
    user.points += entry.points_earned;
    user.level = scoring_cfg.level_for(user.points);
    update_streak(user, now.date());
    user.food_history.push(FoodHistoryItem {
        id: entry.id,
        food_name: entry.food_name.clone(),
        timestamp: entry.timestamp,
        points_earned: entry.points_earned,
    });

    let user_entries: Vec<FoodEntry> = entries
        .iter()
        .filter(|e| e.user_id == user_id)
        .cloned()
        .collect();
    let new_badges = BadgeEvaluator::new(scoring_cfg).evaluate(user, &user_entries);
    user.badges.extend(new_badges.iter().cloned());
    let total_points = user.points;

    txn.save_entries(&entries).await?;
    txn.save_users(&users).await?;

    info!(
        user_id = %user_id,
        entry_id = %entry.id,
        score = entry.ai_analysis_result.ai_score,
        points = entry.points_earned,
        badges = new_badges.len(),
        "food entry created"
    );

    Ok(SubmissionResult {
        entry,
        new_badges,
        total_points,
    })
}

/// Consecutive-day streak bookkeeping. Same-day repeats leave the streak
/// untouched; a one-day gap extends it; anything longer restarts at 1.
pub(crate) fn update_streak(user: &mut User, today: Date) {
    match user.last_entry_date {
        Some(last) if last == today => {}
        Some(last) => {
            let gap = (today - last).whole_days();
            user.streak_days = if gap == 1 { user.streak_days + 1 } else { 1 };
            user.last_entry_date = Some(today);
        }
        None => {
            user.streak_days = 1;
            user.last_entry_date = Some(today);
        }
    }
}

async fn save_image(
    state: &AppState,
    image: &UploadedImage,
    now: OffsetDateTime,
) -> anyhow::Result<String> {
    let safe_name: String = image
        .filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let filename = format!("{}-{}", now.unix_timestamp_nanos() / 1_000_000, safe_name);
    let path = state.config.uploads_dir.join(&filename);
    tokio::fs::write(&path, &image.body)
        .await
        .with_context(|| format!("save upload {}", path.display()))?;
    Ok(format!("/uploads/{filename}"))
}
