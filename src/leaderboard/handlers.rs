use axum::{extract::State, Json};
use time::OffsetDateTime;
use tracing::instrument;

use super::dto::LeaderboardResponse;
use super::services::build_leaderboard;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /leaderboard: class-scoped for students and teachers, global for
/// admins.
#[instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<LeaderboardResponse>> {
    let reader = state.store.read().await;
    let users = reader.users().await?;
    let entries = reader.entries().await?;

    Ok(Json(build_leaderboard(
        &users,
        &entries,
        state.config.scoring.leaderboard_healthy_cutoff,
        auth.is_admin(),
        &auth.class_code,
        OffsetDateTime::now_utc(),
    )))
}
