use axum::{extract::State, Json};
use tracing::{info, instrument, warn};

use super::dto::{AuthResponse, LoginRequest, PublicUser};
use super::{password, JwtKeys};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /login: username + class code + password.
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation(
            "username and password are required".into(),
        ));
    }

    let class_code = body.class_code.trim().to_uppercase();
    let users = state.store.read().await.users().await?;
    let user = users.iter().find(|u| {
        u.username == body.username && u.class_code.eq_ignore_ascii_case(&class_code)
    });

    let Some(user) = user else {
        warn!("login for unknown user");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    };

    if !password::verify_password(&body.password, &user.password_hash).unwrap_or(false) {
        warn!(user_id = %user.id, "wrong password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_config(&state.config.jwt);
    let token = keys.sign(user)?;
    info!(user_id = %user.id, "login ok");

    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(user),
    }))
}
