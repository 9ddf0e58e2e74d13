use axum::{routing::get, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/me", get(handlers::get_me))
        .route(
            "/users/:id",
            get(handlers::get_user).delete(handlers::delete_user),
        )
}
