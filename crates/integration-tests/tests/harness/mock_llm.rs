//! Mock chat model backend for integration tests
//!
//! Implements the streaming half of an OpenAI-compatible chat completions
//! API. Every request body is recorded so tests can inspect the assembled
//! system prompt.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

const DEFAULT_REPLY: &str = "Hello from mock LLM";

/// Mock model that streams a canned reply word by word
pub struct MockLlm {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockLlmState>,
}

struct MockLlmState {
    completion_count: AtomicU32,
    requests: Mutex<Vec<Value>>,
    reply: String,
    fail: bool,
}

impl MockLlm {
    /// Start the mock server with the default reply
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(DEFAULT_REPLY, false).await
    }

    /// Start a mock server that streams `reply`
    pub async fn start_with_response(reply: &str) -> anyhow::Result<Self> {
        Self::start_inner(reply, false).await
    }

    /// Start a mock server that answers every request with 500
    pub async fn start_failing() -> anyhow::Result<Self> {
        Self::start_inner(DEFAULT_REPLY, true).await
    }

    async fn start_inner(reply: &str, fail: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            completion_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
            reply: reply.to_owned(),
            fail,
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = super::spawn_mock(app).await?;

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`, the provider appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// Most recent request body
    pub fn last_request(&self) -> Option<Value> {
        self.state.requests.lock().unwrap().last().cloned()
    }

    /// System prompt of the most recent request
    pub fn last_system_prompt(&self) -> Option<String> {
        let request = self.last_request()?;
        request["messages"]
            .as_array()?
            .iter()
            .find(|message| message["role"] == "system")
            .and_then(|message| message["content"].as_str())
            .map(str::to_owned)
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_chat_completions(State(state): State<Arc<MockLlmState>>, Json(request): Json<Value>) -> impl IntoResponse {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    let model = request["model"].as_str().unwrap_or("mock-model").to_owned();
    state.requests.lock().unwrap().push(request);

    if state.fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": {
                    "message": "mock server intentional failure",
                    "type": "server_error"
                }
            })),
        )
            .into_response();
    }

    ([(header::CONTENT_TYPE, "text/event-stream")], streaming_body(&state.reply, &model)).into_response()
}

/// One chunk per word, a finish chunk, then `[DONE]`
fn streaming_body(reply: &str, model: &str) -> String {
    let mut body = String::new();

    let words: Vec<&str> = reply.split_inclusive(' ').collect();
    for (index, word) in words.iter().enumerate() {
        let delta = if index == 0 {
            json!({"role": "assistant", "content": word})
        } else {
            json!({"content": word})
        };
        body.push_str(&sse_line(&chunk(model, delta, Value::Null)));
    }

    body.push_str(&sse_line(&chunk(model, json!({}), json!("stop"))));
    body.push_str("data: [DONE]\n\n");
    body
}

fn chunk(model: &str, delta: Value, finish_reason: Value) -> Value {
    json!({
        "id": "chatcmpl-test-stream",
        "object": "chat.completion.chunk",
        "created": 1_700_000_000u64,
        "model": model,
        "choices": [{"index": 0, "delta": delta, "finish_reason": finish_reason}]
    })
}

fn sse_line(value: &Value) -> String {
    format!("data: {value}\n\n")
}
