use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/food-entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024)) // 5MB image cap
}
