pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/courses",
            get(catalog::handle_list_courses).post(catalog::handle_create_course),
        )
        .route(
            "/api/generate-courses",
            post(generation::handle_generate_courses),
        )
        .with_state(state)
}
