use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat/conversations", get(handlers::list_conversations))
        .route("/chat/message", post(handlers::post_message))
        .route("/faq", get(handlers::list_faq))
}
