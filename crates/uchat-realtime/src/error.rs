use std::time::Duration;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use uchat_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, RealtimeError>;

/// Failures of realtime lookups
///
/// Inside the chat pipeline these are logged and dropped. The REST
/// endpoints surface them.
#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider section missing from configuration
    #[error("{0} provider is not configured")]
    NotConfigured(&'static str),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

impl HttpError for RealtimeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::NotConfigured(_) => "not_configured_error",
            Self::Upstream(_) => "upstream_error",
            Self::Timeout(_) => "timeout_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for RealtimeError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}

impl From<reqwest::Error> for RealtimeError {
    fn from(error: reqwest::Error) -> Self {
        Self::Upstream(error.to_string())
    }
}
