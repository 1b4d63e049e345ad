use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// An unreachable profile source is not represented here: the fetcher absorbs it
/// and the platform contributes empty text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid file type. Please upload a PDF.")]
    InvalidFileType,

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Google API key is not configured on the server.")]
    MissingConfiguration,

    #[error("AI service error: {0}")]
    AiService(String),

    #[error("The AI response was not valid JSON: {reason}")]
    MalformedAiResponse { reason: String, raw_response: String },

    #[error("Analysis did not finish within {0} seconds")]
    Timeout(u64),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidFileType => (
                StatusCode::BAD_REQUEST,
                "INVALID_FILE_TYPE",
                self.to_string(),
            ),
            AppError::InvalidDocument(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_DOCUMENT", msg.clone())
            }
            AppError::MissingConfiguration => {
                tracing::error!("Rejecting request: GOOGLE_API_KEY is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MISSING_CONFIGURATION",
                    self.to_string(),
                )
            }
            AppError::AiService(msg) => {
                tracing::error!("AI service error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "AI_SERVICE_ERROR",
                    format!("Error communicating with the AI service: {msg}"),
                )
            }
            AppError::MalformedAiResponse {
                reason,
                raw_response,
            } => {
                tracing::error!("Unparseable AI response ({reason}). Raw response:\n{raw_response}");
                let body = Json(json!({
                    "error": {
                        "code": "MALFORMED_AI_RESPONSE",
                        "message": self.to_string(),
                        "raw_response": raw_response,
                    }
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            AppError::Timeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                "REQUEST_TIMEOUT",
                self.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
