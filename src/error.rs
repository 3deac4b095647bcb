use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),
    #[error("No columns to parse from file")]
    EmptyColumnSet,
    #[error("Voice summary error: {0}")]
    SummaryGeneration(String),
    #[error("Speech synthesis error: {0}")]
    SpeechSynthesis(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MalformedDataset(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EmptyColumnSet => (
                StatusCode::BAD_REQUEST,
                "No columns to parse from file".to_string(),
            ),
            AppError::SummaryGeneration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::SpeechSynthesis(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
