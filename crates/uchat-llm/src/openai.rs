//! OpenAI-compatible provider implementation

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use uchat_config::LlmConfig;
use url::Url;

use crate::{
    error::LlmError,
    protocol::{OpenAiRequest, OpenAiStreamChunk, chunk_to_events},
    provider::{EventStream, Provider},
    types::{CompletionRequest, StreamEvent},
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible streaming provider
pub struct OpenAiProvider {
    client: Client,
    base_url: Url,
    api_key: SecretString,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| LlmError::Internal(e.into()))?,
        };

        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| LlmError::InvalidRequest("llm.api_key is not configured".to_owned()))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    // Compatible servers often reject `stream_options`
    fn is_canonical_openai(&self) -> bool {
        self.base_url.host_str().is_some_and(|h| h == "api.openai.com")
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete_stream(&self, request: &CompletionRequest) -> Result<EventStream, LlmError> {
        let wire_request = OpenAiRequest::streaming(request, self.is_canonical_openai());

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "model stream request failed");
                LlmError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "model provider returned error");
            return Err(LlmError::Upstream(format!("provider returned {status}: {body}")));
        }

        let mapped = response
            .bytes_stream()
            .eventsource()
            .map(|result| match result {
                Ok(event) => {
                    let data = event.data.trim();
                    if data == "[DONE]" {
                        return vec![Ok(StreamEvent::Done)];
                    }

                    match serde_json::from_str::<OpenAiStreamChunk>(data) {
                        Ok(chunk) => chunk_to_events(chunk).into_iter().map(Ok).collect(),
                        Err(e) => {
                            tracing::debug!(error = %e, data = %data, "skipping unparseable SSE chunk");
                            vec![]
                        }
                    }
                }
                Err(e) => vec![Err(LlmError::Streaming(e.to_string()))],
            })
            .flat_map(futures_util::stream::iter);

        Ok(Box::pin(mapped))
    }
}
