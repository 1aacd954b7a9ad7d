//! Test server wrapper that starts uchat on a random port

use std::net::SocketAddr;

use serde_json::Value;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use uchat_config::Config;
use uchat_server::Server;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
    _uploads: TempDir,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 and stores uploads in a fresh temporary directory
    pub async fn start(mut config: Config) -> anyhow::Result<Self> {
        let uploads = tempfile::tempdir()?;
        config.uploads.directory = uploads.path().to_path_buf();

        let server = Server::new(config).await?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(
                listener,
                server.into_router().into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async move {
                shutdown_clone.cancelled().await;
            })
            .await
            .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
            _uploads: uploads,
        })
    }

    /// URL of `path` on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST `/chat` and collect every SSE event payload
    pub async fn chat(&self, body: &Value) -> anyhow::Result<Vec<Value>> {
        let response = self.client.post(self.url("/chat")).json(body).send().await?;
        anyhow::ensure!(response.status() == 200, "chat returned {}", response.status());

        let text = response.text().await?;
        Ok(parse_sse_events(&text))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Decode `data:` lines of an SSE body as JSON
pub fn parse_sse_events(text: &str) -> Vec<Value> {
    text.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .filter_map(|data| serde_json::from_str(data.trim()).ok())
        .collect()
}

/// `type` field of each event
pub fn event_types(events: &[Value]) -> Vec<&str> {
    events.iter().filter_map(|event| event["type"].as_str()).collect()
}

/// Concatenated `chunk` payloads
pub fn streamed_text(events: &[Value]) -> String {
    events
        .iter()
        .filter(|event| event["type"] == "chunk")
        .filter_map(|event| event["data"].as_str())
        .collect()
}

/// Payload of the `final` event
pub fn final_event(events: &[Value]) -> Option<&Value> {
    events.iter().find(|event| event["type"] == "final").map(|event| &event["data"])
}
