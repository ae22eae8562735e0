use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(handlers::get_user))
        .route("/admin/users", get(handlers::list_users).post(handlers::create_user))
        .route("/badges", get(handlers::badge_catalog))
}
