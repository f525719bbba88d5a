use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every failure serializes to the `{"error": "<message>"}` body the page renders.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upload validation failure. The message is shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// The document parsed to nothing, or the parser itself failed.
    #[error("Could not extract text from resume: {0}")]
    Extraction(String),

    /// Multipart decoding failure, including a body over the upload limit.
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Extraction(detail) => {
                tracing::warn!("Text extraction failed: {detail}");
                (
                    StatusCode::BAD_REQUEST,
                    "Could not extract text from resume".to_string(),
                )
            }
            AppError::Multipart(e) => {
                let status = e.status();
                tracing::warn!("Multipart decode failed: {}", e.body_text());
                let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "File exceeds the maximum upload size".to_string()
                } else {
                    "Could not read multipart form data".to_string()
                };
                (status, message)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
