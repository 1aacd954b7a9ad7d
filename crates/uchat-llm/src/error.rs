use http::StatusCode;
use thiserror::Error;
use uchat_core::HttpError;

/// Errors raised while talking to the model
#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream provider rejected the call or could not be reached
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The event stream broke after it started
    #[error("streaming error: {0}")]
    Streaming(String),

    /// Caller asked for something the provider cannot serve
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Streaming(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Upstream(_) => "upstream_error",
            Self::Streaming(_) => "streaming_error",
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}
