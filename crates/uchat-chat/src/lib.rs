//! Chat endpoint and conversation history
//!
//! `POST /chat` validates the request, gathers realtime snippets and
//! up-front images, assembles the system prompt, and relays the model's
//! stream to the caller as server-sent events before persisting the turn.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod relay;
mod request;
mod router;
mod service;

use std::sync::Arc;

use uchat_realtime::RealtimeService;
use uchat_store::ChatStore;

pub use error::{ChatError, Result};
pub use relay::{RelayEvent, TurnDraft, relay};
pub use request::ChatRequest;
pub use router::endpoint_router;
pub use service::{ChatService, PreparedChat};

/// Build the chat service from configuration
///
/// # Errors
///
/// Returns an error if the model provider cannot be created
pub fn build_service(
    config: &uchat_config::Config,
    realtime: Arc<RealtimeService>,
    store: Arc<dyn ChatStore>,
) -> anyhow::Result<Arc<ChatService>> {
    let provider = uchat_llm::build_provider(&config.llm)
        .map_err(|e| anyhow::anyhow!("failed to initialize model provider: {e}"))?;

    Ok(Arc::new(ChatService::new(config, provider, realtime, store)))
}
