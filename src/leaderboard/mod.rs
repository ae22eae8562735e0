use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new().route("/leaderboard", get(handlers::get_leaderboard))
}
