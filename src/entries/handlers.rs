use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::dto::{CreatedEntryResponse, ListQuery};
use super::services::{self, NewEntryInput, UploadedImage};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::models::{FoodEntry, MealType};

/// POST /food-entries (multipart): food_name, quantity, meal_type, notes,
/// detected_food and an optional image file.
#[instrument(skip(state, multipart), fields(user_id = %auth.user_id))]
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<CreatedEntryResponse>)> {
    let mut food_name: Option<String> = None;
    let mut quantity: f64 = 100.0;
    let mut meal_type = MealType::default();
    let mut notes: Option<String> = None;
    let mut detected_food: Option<String> = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("food_name") => {
                food_name = Some(field.text().await.map_err(bad_field)?);
            }
            Some("quantity") => {
                let raw = field.text().await.map_err(bad_field)?;
                if let Ok(q) = raw.trim().parse::<f64>() {
                    if q > 0.0 {
                        quantity = q;
                    }
                }
            }
            Some("meal_type") => {
                let raw = field.text().await.map_err(bad_field)?;
                meal_type = MealType::parse_or_default(&raw);
            }
            Some("notes") => {
                notes = Some(field.text().await.map_err(bad_field)?);
            }
            Some("detected_food") => {
                detected_food = Some(field.text().await.map_err(bad_field)?);
            }
            Some("image") => {
                let content_type = field.content_type().unwrap_or("").to_string();
                if !content_type.starts_with("image/") {
                    return Err(ApiError::Validation(
                        "only image uploads are allowed".into(),
                    ));
                }
                let filename = field.file_name().unwrap_or("upload").to_string();
                let body = field.bytes().await.map_err(bad_field)?;
                image = Some(UploadedImage { filename, body });
            }
            _ => {}
        }
    }

    let Some(food_name) = food_name else {
        return Err(ApiError::Validation("food_name is required".into()));
    };

    let result = services::submit_entry(
        &state,
        auth.user_id,
        NewEntryInput {
            food_name,
            quantity,
            meal_type,
            notes,
            detected_food,
            image,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedEntryResponse {
            entry: result.entry,
            new_badges: result.new_badges,
            total_points: result.total_points,
            message: "Voedselinvoer succesvol toegevoegd".into(),
        }),
    ))
}

/// GET /food-entries: own history; admins may ask for any user's.
#[instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(q): Query<ListQuery>,
) -> ApiResult<Json<Vec<FoodEntry>>> {
    let target = q.user_id.unwrap_or(auth.user_id);
    if target != auth.user_id && !auth.is_admin() {
        return Err(ApiError::Forbidden(
            "not allowed to view these entries".into(),
        ));
    }

    let mut entries: Vec<FoodEntry> = state
        .store
        .read()
        .await
        .entries()
        .await?
        .into_iter()
        .filter(|e| e.user_id == target)
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(Json(entries))
}

fn bad_field(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation(format!("invalid form field: {e}"))
}
