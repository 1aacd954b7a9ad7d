use std::sync::Arc;

use futures_util::{Stream, StreamExt, stream};
use serde::Serialize;
use uchat_core::Timestamp;
use uchat_llm::{EventStream, StreamEvent};
use uchat_store::{ChatStore, ChatTurn};
use uuid::Uuid;

/// Frame sent to the browser, serialized as `{"type": ..., "data": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RelayEvent {
    /// Images fetched before generation; always precedes any chunk
    Images(Vec<String>),
    Chunk(String),
    Final {
        text: String,
        image_urls: Vec<String>,
        message_id: String,
    },
    /// Generation broke mid-stream; nothing is persisted
    Error(String),
}

/// What gets persisted once the reply is complete
#[derive(Debug, Clone)]
pub struct TurnDraft {
    pub session_id: Option<String>,
    pub user_email: Option<String>,
    pub user_message: String,
    pub timestamp: Timestamp,
}

enum Phase {
    Images(Vec<String>),
    Streaming,
    Done,
}

struct RelayState {
    upstream: EventStream,
    phase: Phase,
    image_urls: Vec<String>,
    reply: String,
    draft: TurnDraft,
    store: Arc<dyn ChatStore>,
}

/// Forward model output as relay events
///
/// Emits `images` first when `image_urls` is non-empty, then one `chunk`
/// per non-empty delta in arrival order. When the model finishes the turn
/// is stored and a single `final` event closes the stream. An upstream
/// error ends the stream with an `error` event instead.
pub fn relay(
    upstream: EventStream,
    image_urls: Vec<String>,
    draft: TurnDraft,
    store: Arc<dyn ChatStore>,
) -> impl Stream<Item = RelayEvent> + Send {
    let phase = if image_urls.is_empty() {
        Phase::Streaming
    } else {
        Phase::Images(image_urls.clone())
    };

    let state = RelayState {
        upstream,
        phase,
        image_urls,
        reply: String::new(),
        draft,
        store,
    };

    stream::unfold(state, |mut state| async move {
        let event = state.next_event().await?;
        Some((event, state))
    })
}

impl RelayState {
    async fn next_event(&mut self) -> Option<RelayEvent> {
        match std::mem::replace(&mut self.phase, Phase::Streaming) {
            Phase::Images(urls) => return Some(RelayEvent::Images(urls)),
            Phase::Done => {
                self.phase = Phase::Done;
                return None;
            }
            Phase::Streaming => {}
        }

        loop {
            match self.upstream.next().await {
                Some(Ok(StreamEvent::Delta(text))) => {
                    if text.is_empty() {
                        continue;
                    }
                    self.reply.push_str(&text);
                    return Some(RelayEvent::Chunk(text));
                }
                Some(Ok(StreamEvent::Finish(reason))) => {
                    tracing::debug!(?reason, "model finished generating");
                }
                Some(Ok(StreamEvent::Usage(usage))) => {
                    tracing::debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        "model usage"
                    );
                }
                Some(Ok(StreamEvent::Done)) | None => {
                    self.phase = Phase::Done;
                    return Some(self.finish().await);
                }
                Some(Err(error)) => {
                    tracing::error!(%error, "model stream failed after it started");
                    self.phase = Phase::Done;
                    return Some(RelayEvent::Error(error.to_string()));
                }
            }
        }
    }

    async fn finish(&mut self) -> RelayEvent {
        let message_id = Uuid::new_v4().to_string();
        let text = std::mem::take(&mut self.reply);
        let image_urls = std::mem::take(&mut self.image_urls);

        let turn = ChatTurn {
            message_id: message_id.clone(),
            session_id: self.draft.session_id.clone(),
            user_email: self.draft.user_email.clone(),
            timestamp: self.draft.timestamp,
            user_message: self.draft.user_message.clone(),
            ai_reply: text.clone(),
            image_urls: image_urls.clone(),
        };

        if let Err(error) = self.store.append_turn(turn).await {
            tracing::error!(%error, %message_id, "failed to persist chat turn");
        }

        RelayEvent::Final {
            text,
            image_urls,
            message_id,
        }
    }
}
