//! HTTP handlers for the extraction API.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::extraction::Triple;
use crate::parser::ParseError;

/// User-facing message for requests without text.
pub const MISSING_TEXT_MESSAGE: &str = "请提供文本内容";

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for `POST /extract`.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Text to extract from; an empty string is valid.
    #[serde(default)]
    pub text: Option<String>,
}

/// Successful response from `POST /extract`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub triples: Vec<Triple>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

/// Response from `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub model: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request body has no text")]
    MissingText,

    /// The body could not be read, most often because it exceeds the
    /// configured size limit.
    #[error("Request body could not be read: {reason}")]
    UnreadableBody { status: StatusCode, reason: String },

    #[error("Dependency parser failed: {0}")]
    Parser(#[from] ParseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingText => (StatusCode::BAD_REQUEST, MISSING_TEXT_MESSAGE.to_string()),
            ApiError::UnreadableBody { status, reason } => (status, reason),
            err @ ApiError::Parser(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
        };

        let body = ErrorResponse {
            success: false,
            message,
        };

        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// POST /extract - Extract triples from free-form text.
pub async fn extract_triples(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let text = match payload {
        Ok(Json(ExtractRequest { text: Some(text) })) => text,
        Ok(Json(ExtractRequest { text: None })) => return Err(ApiError::MissingText),
        Err(JsonRejection::BytesRejection(rejection)) => {
            tracing::warn!(error = %rejection, "Failed to read extract request body");
            return Err(ApiError::UnreadableBody {
                status: rejection.status(),
                reason: rejection.body_text(),
            });
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected extract request body");
            return Err(ApiError::MissingText);
        }
    };

    let triples = state.extractor.extract(&text).await.map_err(|e| {
        tracing::error!(error = %e, "Dependency parse failed");
        ApiError::from(e)
    })?;

    Ok(Json(ExtractResponse {
        success: true,
        triples,
    }))
}

/// GET /health - Report the loaded parser model.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let parser = state.extractor.parser();
    Json(HealthResponse {
        status: "ok".to_string(),
        backend: parser.backend_name().to_string(),
        model: parser.model().to_string(),
    })
}
