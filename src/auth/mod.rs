use axum::{routing::post, Router};

use crate::state::AppState;

mod claims;
mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use claims::Claims;
pub use jwt::{AuthUser, JwtKeys};

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(handlers::login))
}
