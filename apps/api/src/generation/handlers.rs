//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::extract::recover_json;
use crate::generation::prompts::DEFAULT_COURSE_PROMPT;
use crate::models::course::CourseDraft;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateCoursesRequest {
    /// Freeform instruction for the model. Absent or blank falls back to
    /// the default course prompt.
    #[serde(default)]
    pub prompt: Option<String>,
}

/// POST /api/generate-courses
///
/// Proxies the prompt to the completion gateway and returns whatever JSON
/// can be recovered from the reply, as-is. A shape mismatch against the
/// course schema is logged but not rejected: the typed boundary for saving
/// generated courses is POST /api/courses, not this endpoint.
///
/// The body itself is optional; a bare POST generates with the default
/// prompt rather than bouncing on a missing content-type.
pub async fn handle_generate_courses(
    State(state): State<AppState>,
    request: Option<Json<GenerateCoursesRequest>>,
) -> Result<Json<Value>, AppError> {
    let prompt = request
        .as_ref()
        .and_then(|Json(request)| request.prompt.as_deref())
        .map(str::trim)
        .filter(|prompt| !prompt.is_empty())
        .unwrap_or(DEFAULT_COURSE_PROMPT);

    info!(prompt_chars = prompt.len(), "requesting course generation");

    let envelope = state.gateway.complete(prompt).await?;
    let generated = recover_json(&envelope)?;

    if serde_json::from_value::<Vec<CourseDraft>>(generated.clone()).is_err() {
        warn!("generated payload is not a course array; returning it unchanged");
    }

    state.audit.record(prompt, &generated).await;

    Ok(Json(generated))
}
