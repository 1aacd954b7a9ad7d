use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::{
    error::LlmError,
    types::{CompletionRequest, StreamEvent},
};

/// Boxed stream of model events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send>>;

/// Trait implemented by each chat model backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Start a streaming completion
    ///
    /// Resolves once the upstream accepted the request, so connection and
    /// status failures surface here rather than inside the stream.
    async fn complete_stream(&self, request: &CompletionRequest) -> Result<EventStream, LlmError>;
}
