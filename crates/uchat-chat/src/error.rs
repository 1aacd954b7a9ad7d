use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use uchat_core::{ErrorBody, HttpError};
use uchat_llm::LlmError;
use uchat_store::StoreError;

pub type Result<T> = std::result::Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request body is too large")]
    PayloadTooLarge,

    /// Generation failed before any output was streamed
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HttpError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Model(error) => error.status_code(),
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Model(_) => "model_error",
            Self::Store(StoreError::NotFound(_)) => "not_found_error",
            Self::Store(StoreError::Backend(_)) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Model(error) => format!("model call failed: {}", error.client_message()),
            Self::Store(StoreError::Backend(_)) => "Internal server error".to_owned(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match &self {
            Self::Model(error) => tracing::error!(%error, "chat request failed"),
            Self::Store(StoreError::Backend(error)) => tracing::error!(%error, "chat store failed"),
            _ => {}
        }

        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_failure_is_500_with_detail() {
        let error = ChatError::from(LlmError::Upstream("HTTP 502: bad gateway".to_owned()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.client_message().contains("bad gateway"));
    }

    #[test]
    fn missing_session_is_404() {
        let error = ChatError::from(StoreError::NotFound("session 's1'".to_owned()));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.client_message(), "session 's1' not found");
    }
}
