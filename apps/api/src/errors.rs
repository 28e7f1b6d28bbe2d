use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::generation::extract::ExtractionError;
use crate::llm_client::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every response body is the flat `{"error": ...}` shape the catalog UI
/// expects, with a `"raw"` field holding undoctored upstream text whenever
/// there is any. Internal errors stay generic on the wire and verbose in
/// the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, raw) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Gateway(error) => gateway_response(error),
            AppError::Extraction(error) => {
                tracing::error!("extraction failed: {error}");
                let message = error.to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    Some(error.candidate),
                )
            }
            AppError::Internal(error) => {
                tracing::error!("Internal error: {error:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({ "error": message });
        if let Some(raw) = raw {
            body["raw"] = Value::String(raw);
        }

        (status, Json(body)).into_response()
    }
}

/// Gateway failures keep the upstream's own words: its status code where
/// there is one, and the raw reply body under `"raw"`.
fn gateway_response(error: GatewayError) -> (StatusCode, String, Option<String>) {
    match error {
        GatewayError::Upstream { status, body } => {
            tracing::error!(status, "completion endpoint returned an error");
            (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Failed to fetch from OpenRouter API".to_string(),
                Some(body),
            )
        }
        GatewayError::Unreachable(source) => {
            let message = format!("completion endpoint unreachable: {source}");
            tracing::error!("{message}");
            (StatusCode::SERVICE_UNAVAILABLE, message, Some(String::new()))
        }
        GatewayError::InvalidEnvelope { raw } => {
            tracing::error!("completion endpoint returned a non-JSON body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "OpenRouter response was not valid JSON".to_string(),
                Some(raw),
            )
        }
    }
}
