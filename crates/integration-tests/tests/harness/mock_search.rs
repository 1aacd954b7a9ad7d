//! Mock SerpApi backend
//!
//! Web searches return a fixed answer box plus organic results; the
//! `google_images` engine returns a fixed image list containing a duplicate.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Image URLs served for every image search
pub const IMAGE_URLS: [&str; 4] = [
    "https://img.example/1.jpg",
    "https://img.example/2.jpg",
    "https://img.example/1.jpg",
    "https://img.example/3.jpg",
];

/// A recorded upstream call
#[derive(Debug, Clone)]
pub struct SearchCall {
    pub query: String,
    pub engine: Option<String>,
}

/// Mock search provider
pub struct MockSearch {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSearchState>,
}

struct MockSearchState {
    answer: String,
    calls: Mutex<Vec<SearchCall>>,
}

impl MockSearch {
    /// Start a mock whose answer box carries `answer`
    pub async fn start(answer: &str) -> anyhow::Result<Self> {
        let state = Arc::new(MockSearchState {
            answer: answer.to_owned(),
            calls: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/search.json", routing::get(handle_search))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = super::spawn_mock(app).await?;

        Ok(Self { addr, shutdown, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Web search calls, image searches excluded
    pub fn web_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.engine.is_none())
            .map(|call| call.query)
            .collect()
    }

    /// Image search calls
    pub fn image_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.engine.as_deref() == Some("google_images"))
            .map(|call| call.query)
            .collect()
    }

    fn calls(&self) -> Vec<SearchCall> {
        self.state.calls.lock().unwrap().clone()
    }
}

impl Drop for MockSearch {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_search(
    State(state): State<Arc<MockSearchState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let engine = params.get("engine").cloned();
    let query = params.get("q").cloned().unwrap_or_default();

    state.calls.lock().unwrap().push(SearchCall {
        query: query.clone(),
        engine: engine.clone(),
    });

    if engine.as_deref() == Some("google_images") {
        let images: Vec<Value> = IMAGE_URLS
            .iter()
            .map(|url| json!({"original": url, "thumbnail": format!("{url}?thumb")}))
            .collect();
        return Json(json!({ "images_results": images }));
    }

    Json(json!({
        "answer_box": { "answer": state.answer },
        "organic_results": [
            {"title": format!("Result for {query}"), "snippet": "first", "link": "https://a.example"},
            {"title": "Second result", "snippet": "second", "link": "https://b.example"}
        ]
    }))
}
