use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quiz/questions", get(handlers::get_questions))
        .route("/quiz/submit", post(handlers::submit_answers))
}
