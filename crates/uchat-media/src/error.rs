use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use uchat_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("file exceeds the {0} byte upload limit")]
    PayloadTooLarge(usize),

    #[error("file not found")]
    NotFound,

    /// Provider section missing from configuration
    #[error("{0} provider is not configured")]
    NotConfigured(&'static str),

    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Transcription(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] uchat_store::StoreError),
}

impl HttpError for MediaError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Extraction(_) | Self::Transcription(_) | Self::Io(_) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::NotFound => "not_found_error",
            Self::NotConfigured(_) => "not_configured_error",
            Self::Extraction(_) => "extraction_error",
            Self::Transcription(_) => "transcription_error",
            Self::Io(_) | Self::Store(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Io(_) | Self::Store(_) => "Internal server error".to_owned(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        match &self {
            Self::Io(error) => tracing::error!(%error, "file operation failed"),
            Self::Store(error) => tracing::error!(%error, "failed to record file"),
            _ => {}
        }

        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
