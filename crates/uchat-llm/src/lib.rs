//! Chat model access for uchat
//!
//! Canonical message and stream types plus a streaming provider for
//! OpenAI-compatible chat completion APIs.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
mod openai;
mod protocol;
pub mod provider;
pub mod types;

use std::sync::Arc;

use uchat_config::{LlmConfig, LlmProviderType};

pub use error::LlmError;
pub use openai::OpenAiProvider;
pub use provider::{EventStream, Provider};
pub use types::{CompletionRequest, Content, ContentPart, FinishReason, Message, Role, StreamEvent, Usage};

/// Build the configured provider
pub fn build_provider(config: &LlmConfig) -> Result<Arc<dyn Provider>, LlmError> {
    let provider: Arc<dyn Provider> = match config.provider_type {
        LlmProviderType::Openai => Arc::new(OpenAiProvider::new(config)?),
    };

    tracing::debug!(provider = provider.name(), model = %config.default_model, "LLM provider initialized");

    Ok(provider)
}
