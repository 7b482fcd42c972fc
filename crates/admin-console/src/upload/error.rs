//! Error types for both sides of the upload flow, with their HTTP status mapping.

use crate::remote::RequestFailed;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// No file was attached. Nothing is sent or written.
    #[error("No file selected")]
    NoFileProvided,

    #[error("Expected a multipart/form-data request")]
    NotMultipart,

    #[error("Malformed upload: {0}")]
    Malformed(String),

    #[error("Failed to store upload: {0}")]
    Storage(#[from] std::io::Error),

    /// Client side: the upload call itself failed.
    #[error(transparent)]
    Request(RequestFailed),
}

impl UploadError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::NoFileProvided => StatusCode::BAD_REQUEST,
            UploadError::NotMultipart => StatusCode::BAD_REQUEST,
            UploadError::Malformed(_) => StatusCode::BAD_REQUEST,
            UploadError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UploadError::Request(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
