//! HTTP mapping of use case errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::ErrorResponseDto,
    usecase::{DownloadError, UploadError},
};

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponseDto { error: message })).into_response()
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = match &self {
            UploadError::MissingFile
            | UploadError::MissingUsername
            | UploadError::UnsupportedAudioFormat
            | UploadError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            UploadError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::Io(_) | UploadError::Serialization(_) => {
                tracing::error!("Upload failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        error_response(status, self.to_string())
    }
}

impl IntoResponse for DownloadError {
    fn into_response(self) -> Response {
        let status = match &self {
            DownloadError::InvalidName => StatusCode::BAD_REQUEST,
            DownloadError::PathDenied => StatusCode::FORBIDDEN,
            DownloadError::NotFound => StatusCode::NOT_FOUND,
            DownloadError::Io(_) => {
                tracing::error!("Download failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        error_response(status, self.to_string())
    }
}
