//! OpenAI chat completion wire format

use serde::{Deserialize, Serialize};

use crate::types::{CompletionRequest, FinishReason, Message, StreamEvent, Usage};

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<OpenAiStreamOptions>,
}

impl<'a> OpenAiRequest<'a> {
    pub(crate) fn streaming(request: &'a CompletionRequest, include_usage: bool) -> Self {
        Self {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: true,
            stream_options: include_usage.then_some(OpenAiStreamOptions { include_usage: true }),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiStreamOptions {
    pub include_usage: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiStreamChunk {
    #[serde(default)]
    pub choices: Vec<OpenAiStreamChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiStreamChoice {
    #[serde(default)]
    pub delta: OpenAiDelta,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenAiDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Convert one streamed chunk into canonical events
///
/// Empty deltas (role announcements, keep-alive chunks) yield nothing.
pub(crate) fn chunk_to_events(chunk: OpenAiStreamChunk) -> Vec<StreamEvent> {
    let mut events = Vec::new();

    for choice in chunk.choices {
        if let Some(content) = choice.delta.content.filter(|c| !c.is_empty()) {
            events.push(StreamEvent::Delta(content));
        }
        if let Some(reason) = choice.finish_reason {
            events.push(StreamEvent::Finish(reason));
        }
    }

    if let Some(usage) = chunk.usage {
        events.push(StreamEvent::Usage(usage));
    }

    events
}
