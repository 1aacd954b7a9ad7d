//! Mock Whisper transcription backend

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Mock speech-to-text provider
///
/// Answers with a padded transcript so tests can check trimming.
pub struct MockWhisper {
    addr: SocketAddr,
    shutdown: CancellationToken,
    uploads: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockWhisper {
    pub async fn start() -> anyhow::Result<Self> {
        let uploads = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .with_state(Arc::clone(&uploads));

        let (addr, shutdown) = super::spawn_mock(app).await?;

        Ok(Self { addr, shutdown, uploads })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// `(file name, model)` pairs received
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Drop for MockWhisper {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(
    State(uploads): State<Arc<Mutex<Vec<(String, String)>>>>,
    mut multipart: Multipart,
) -> Json<Value> {
    let mut file_name = String::new();
    let mut model = String::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("file") => file_name = field.file_name().unwrap_or_default().to_owned(),
            Some("model") => model = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    uploads.lock().unwrap().push((file_name, model));

    Json(json!({ "text": "  hello from the recording \n" }))
}
