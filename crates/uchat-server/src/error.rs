use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use uchat_core::{ErrorBody, HttpError};
use uchat_store::StoreError;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors of the account and feedback endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request body is too large")]
    PayloadTooLarge,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::InvalidRequest(rejection.body_text())
        }
    }
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Store(StoreError::NotFound(_)) => "not_found_error",
            Self::Store(StoreError::Backend(_)) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Store(StoreError::Backend(_)) => "Internal server error".to_owned(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(StoreError::Backend(error)) = &self {
            tracing::error!(%error, "store write failed");
        }

        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
