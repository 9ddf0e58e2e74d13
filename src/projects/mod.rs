use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            post(handlers::create_project).get(handlers::list_projects),
        )
        .route("/projects/statistics", get(handlers::get_statistics))
        .route(
            "/projects/:id",
            get(handlers::get_project)
                .patch(handlers::update_project)
                .delete(handlers::delete_project),
        )
}
