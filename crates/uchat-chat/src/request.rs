use serde::Deserialize;
use uchat_llm::{Message, Role};

use crate::error::{ChatError, Result};

/// Body of `POST /chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl ChatRequest {
    /// Reject requests without a non-empty final message
    pub fn validate(&self) -> Result<()> {
        let Some(last) = self.messages.last() else {
            return Err(ChatError::InvalidRequest("messages required".to_owned()));
        };

        if last.text().trim().is_empty() {
            return Err(ChatError::InvalidRequest("last message has no content".to_owned()));
        }

        Ok(())
    }

    /// Text the realtime and image routing look at
    ///
    /// The most recent user message, or the last message when the caller
    /// sent no user message at all.
    pub fn utterance(&self) -> String {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .or_else(|| self.messages.last())
            .map(Message::text)
            .unwrap_or_default()
    }

    /// Signed-in identity, ignoring blank values
    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    pub fn session_id(&self) -> Option<&str> {
        non_blank(self.session_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
