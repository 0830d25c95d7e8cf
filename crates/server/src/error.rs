use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use idscan_ocr::PipelineError;

/// Error payload rendered to the client: one human-readable message,
/// no structured codes.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Everything that can go wrong at the boundary. The extraction engine
/// itself cannot fail — these all originate from file handling or the
/// preprocessing/recognition stages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded.")]
    MissingFile,
    #[error("No selected file.")]
    NoFileSelected,
    #[error("Could not read the uploaded file: {0}")]
    UnreadableUpload(String),
    #[error("File not found")]
    NotFound,
    #[error("Error: {0}")]
    Pipeline(#[from] PipelineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFile
            | ApiError::NoFileSelected
            | ApiError::UnreadableUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Pipeline(PipelineError::Preprocess(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Pipeline(PipelineError::RecognizeTimeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
