//! Conversation, visitor and feedback persistence
//!
//! [`ChatStore`] is the document-store seam. [`MemoryStore`] keeps
//! everything in process memory.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod memory;
mod records;

use std::sync::Arc;

use async_trait::async_trait;
use uchat_config::{StorageConfig, StorageType};

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use records::{
    ChatTurn, ContactFeedback, FeedbackKind, FileRecord, MessageFeedback, SessionMeta, SessionSummary, SessionUpdate,
    User, Visitor,
};

/// Document store used by the HTTP handlers
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Persist one completed exchange
    async fn append_turn(&self, turn: ChatTurn) -> Result<()>;

    /// Session summaries owned by `email`, most recently updated first
    async fn history(&self, email: &str) -> Result<Vec<SessionSummary>>;

    /// Turns of one session in chronological order
    ///
    /// A session owned by someone other than `email` is reported as not found.
    async fn session_turns(&self, session_id: &str, email: Option<&str>) -> Result<Vec<ChatTurn>>;

    /// Change title, pin or archive flags of an existing session
    ///
    /// Ownership is checked against `update.email` like [`ChatStore::session_turns`].
    async fn update_session(&self, session_id: &str, update: SessionUpdate) -> Result<SessionMeta>;

    /// Insert a visitor on first sight, otherwise refresh `last_active`
    async fn track_visitor(&self, visitor: Visitor) -> Result<()>;

    /// Insert a user on first login, otherwise refresh `last_login`
    async fn upsert_user(&self, email: &str) -> Result<User>;

    async fn add_contact_feedback(&self, feedback: ContactFeedback) -> Result<()>;

    async fn add_message_feedback(&self, feedback: MessageFeedback) -> Result<()>;

    async fn record_file(&self, file: FileRecord) -> Result<()>;
}

/// Build the configured store
pub fn build_store(config: &StorageConfig) -> Arc<dyn ChatStore> {
    match config.storage_type {
        StorageType::Memory => {
            tracing::debug!("using in-memory chat store");
            Arc::new(MemoryStore::default())
        }
    }
}
