//! Axum route handlers for the Catalog API.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::course::{Course, CourseDraft};
use crate::state::AppState;

/// GET /api/courses
///
/// Returns every stored course in insertion order.
pub async fn handle_list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.store.list().await)
}

/// POST /api/courses
///
/// Validates and stores one submitted course. Any caller-supplied id is
/// ignored; the store assigns the next one and persists before replying.
pub async fn handle_create_course(
    State(state): State<AppState>,
    Json(draft): Json<CourseDraft>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    if draft.price < 0.0 {
        return Err(AppError::Validation(
            "price must be non-negative".to_string(),
        ));
    }

    let course = state.store.append(draft).await?;

    Ok((StatusCode::CREATED, Json(course)))
}
