use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{CreateUserRequest, UserProfile, UserSummary};
use crate::auth::{password, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::scoring::badges::{BadgeSpec, BADGE_CATALOG};
use crate::state::AppState;
use crate::store::models::User;

/// GET /users/:id: self or admin.
#[instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProfile>> {
    if id != auth.user_id && !auth.is_admin() {
        return Err(ApiError::Forbidden("not allowed to view this user".into()));
    }
    let users = state.store.read().await.users().await?;
    let user = users
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(UserProfile::from(user)))
}

/// GET /admin/users
#[instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserSummary>>> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden("admin only".into()));
    }
    let users = state.store.read().await.users().await?;
    let summaries = users
        .iter()
        .map(|u| UserSummary {
            id: u.id,
            username: u.username.clone(),
            class_code: u.class_code.clone(),
            role: u.role,
            points: u.points,
            level: u.level,
            badges: u.badges.clone(),
            streak_days: u.streak_days,
            last_entry: u.food_history.last().map(|h| h.timestamp),
        })
        .collect();
    Ok(Json(summaries))
}

/// POST /admin/users: account provisioning, the only way users come into
/// existence.
#[instrument(skip(state, body), fields(user_id = %auth.user_id))]
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden("admin only".into()));
    }
    let username = body.username.trim().to_string();
    let class_code = body.class_code.trim().to_uppercase();
    if username.is_empty() || body.password.is_empty() || class_code.is_empty() {
        return Err(ApiError::Validation(
            "username, password and class_code are required".into(),
        ));
    }

    let txn = state.store.write().await;
    let mut users = txn.users().await?;
    if users.iter().any(|u| u.username == username) {
        return Err(ApiError::Conflict("username already taken".into()));
    }

    let user = User {
        id: Uuid::new_v4(),
        username,
        password_hash: password::hash_password(&body.password)?,
        class_code,
        role: body.role,
        points: 0,
        level: 1,
        badges: vec![],
        streak_days: 0,
        last_entry_date: None,
        quiz_correct_answers: 0,
        food_history: vec![],
    };
    let profile = UserProfile::from(&user);
    users.push(user);
    txn.save_users(&users).await?;

    info!(new_user = %profile.id, "user provisioned");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /badges: the static catalog, for rendering names and descriptions.
#[instrument(skip(_auth))]
pub async fn badge_catalog(_auth: AuthUser) -> Json<&'static [BadgeSpec]> {
    Json(BADGE_CATALOG)
}
