use std::sync::Arc;

use uchat_config::{Config, ImagesConfig, LlmConfig};
use uchat_core::{ClientContext, Timestamp};
use uchat_llm::{CompletionRequest, EventStream, Provider};
use uchat_prompt::{ImageIntent, PromptContext};
use uchat_realtime::RealtimeService;
use uchat_store::{ChatStore, ChatTurn, SessionMeta, SessionSummary, SessionUpdate, Visitor};

use crate::{
    error::{ChatError, Result},
    relay::TurnDraft,
    request::ChatRequest,
};

/// A validated request whose model stream is open
pub struct PreparedChat {
    pub stream: EventStream,
    /// Images fetched up front for a pure image request
    pub image_urls: Vec<String>,
    pub draft: TurnDraft,
    pub model: String,
}

/// Chat pipeline with its injected collaborators
pub struct ChatService {
    provider: Arc<dyn Provider>,
    realtime: Arc<RealtimeService>,
    store: Arc<dyn ChatStore>,
    llm: LlmConfig,
    images: ImagesConfig,
}

impl ChatService {
    pub fn new(
        config: &Config,
        provider: Arc<dyn Provider>,
        realtime: Arc<RealtimeService>,
        store: Arc<dyn ChatStore>,
    ) -> Self {
        Self {
            provider,
            realtime,
            store,
            llm: config.llm.clone(),
            images: config.images.clone(),
        }
    }

    pub fn store(&self) -> &Arc<dyn ChatStore> {
        &self.store
    }

    /// Run everything up to and including opening the model stream
    ///
    /// Fails without side effects on the conversation when the request is
    /// invalid or the model call cannot be started.
    pub async fn prepare(&self, request: ChatRequest, client: &ClientContext) -> Result<PreparedChat> {
        request.validate()?;
        let model = self.resolve_model(request.model.as_deref())?;

        self.track(client).await;

        let utterance = request.utterance();
        let intent = uchat_prompt::classify_image_intent(&utterance);

        let (image_urls, snippets) =
            futures_util::future::join(self.fetch_images(intent, &utterance), self.realtime.snippets(&utterance)).await;

        let continuation = uchat_prompt::is_continuation(&request.messages);
        let system_prompt = uchat_prompt::assemble_system_prompt(&PromptContext {
            snippets: &snippets,
            client: &client.info,
            now: Timestamp::now(),
            continuation,
            image_mode: !image_urls.is_empty(),
        });

        tracing::debug!(
            %model,
            ?intent,
            snippets = snippets.len(),
            images = image_urls.len(),
            continuation,
            "chat prompt assembled"
        );

        let draft = TurnDraft {
            session_id: request.session_id().map(str::to_owned),
            user_email: request.email().map(str::to_owned),
            user_message: utterance,
            timestamp: Timestamp::now(),
        };

        let messages = uchat_prompt::apply_system_prompt(request.messages, system_prompt);
        let messages = uchat_prompt::trim_to_budget(messages, self.llm.context_budget_tokens);

        let completion = CompletionRequest {
            model: model.clone(),
            messages,
            temperature: Some(self.llm.temperature),
            max_tokens: Some(self.llm.max_tokens),
        };

        let stream = self.provider.complete_stream(&completion).await?;

        Ok(PreparedChat {
            stream,
            image_urls,
            draft,
            model,
        })
    }

    pub async fn history(&self, email: &str) -> Result<Vec<SessionSummary>> {
        Ok(self.store.history(email).await?)
    }

    pub async fn session_turns(&self, session_id: &str, email: &str) -> Result<Vec<ChatTurn>> {
        Ok(self.store.session_turns(session_id, Some(email)).await?)
    }

    pub async fn update_session(&self, session_id: &str, update: SessionUpdate) -> Result<SessionMeta> {
        Ok(self.store.update_session(session_id, update).await?)
    }

    fn resolve_model(&self, requested: Option<&str>) -> Result<String> {
        let Some(model) = requested.map(str::trim).filter(|model| !model.is_empty()) else {
            return Ok(self.llm.default_model.clone());
        };

        if self.llm.allows_model(model) {
            Ok(model.to_owned())
        } else {
            Err(ChatError::InvalidRequest(format!("model '{model}' is not allowed")))
        }
    }

    async fn fetch_images(&self, intent: ImageIntent, utterance: &str) -> Vec<String> {
        if intent != ImageIntent::PureImage || !self.images.enabled {
            return Vec::new();
        }

        let query = uchat_prompt::image_search_query(utterance);
        match self.realtime.image_urls(&query, self.images.max_images).await {
            Ok(urls) => urls,
            Err(error) => {
                tracing::warn!(%query, %error, "image fetch failed");
                Vec::new()
            }
        }
    }

    async fn track(&self, client: &ClientContext) {
        let now = Timestamp::now();
        let visitor = Visitor {
            ip: client.ip.clone(),
            browser: client.info.browser.clone(),
            os: client.info.os.clone(),
            device: client.info.device.clone(),
            ua: client.user_agent.clone(),
            first_visit: now,
            last_active: now,
        };

        if let Err(error) = self.store.track_visitor(visitor).await {
            tracing::warn!(%error, ip = %client.ip, "failed to track visitor");
        }
    }
}
