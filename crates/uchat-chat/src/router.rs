use std::{convert::Infallible, sync::Arc};

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures_util::StreamExt;
use http::StatusCode;
use serde::Deserialize;
use uchat_core::ClientContext;
use uchat_store::{ChatTurn, SessionMeta, SessionSummary, SessionUpdate};

use crate::{
    error::{ChatError, Result},
    relay::relay,
    request::ChatRequest,
    service::ChatService,
};

/// Routes for chatting and browsing stored conversations
pub fn endpoint_router() -> Router<Arc<ChatService>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/history", get(history))
        .route("/chat/session/{session_id}", get(session).patch(update_session))
}

/// Map body extraction failures onto the JSON error shape
fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(ChatError::PayloadTooLarge),
        Err(rejection) => Err(ChatError::InvalidRequest(rejection.body_text())),
    }
}

async fn chat(
    State(service): State<Arc<ChatService>>,
    client: Option<Extension<ClientContext>>,
    body: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response> {
    let request = json_body(body)?;
    let client = client.map_or_else(ClientContext::unknown, |Extension(client)| client);

    let prepared = service.prepare(request, &client).await?;

    tracing::info!(
        model = %prepared.model,
        session = ?prepared.draft.session_id,
        images = prepared.image_urls.len(),
        "streaming chat reply"
    );

    let events = relay(
        prepared.stream,
        prepared.image_urls,
        prepared.draft,
        Arc::clone(service.store()),
    )
    .map(|event| Ok::<_, Infallible>(sse_event(&event)));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()).into_response())
}

fn sse_event(event: &impl serde::Serialize) -> Event {
    Event::default().json_data(event).unwrap_or_else(|error| {
        tracing::error!(%error, "failed to encode chat event");
        Event::default().data(r#"{"type":"error","data":"failed to encode event"}"#)
    })
}

#[derive(Debug, Deserialize)]
struct EmailParams {
    #[serde(default)]
    email: Option<String>,
}

impl EmailParams {
    fn email(&self) -> Result<&str> {
        required_email(self.email.as_deref())
    }
}

fn required_email(email: Option<&str>) -> Result<&str> {
    email
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| ChatError::InvalidRequest("email is required".to_owned()))
}

async fn history(
    State(service): State<Arc<ChatService>>,
    Query(params): Query<EmailParams>,
) -> Result<Json<Vec<SessionSummary>>> {
    Ok(Json(service.history(params.email()?).await?))
}

async fn session(
    State(service): State<Arc<ChatService>>,
    Path(session_id): Path<String>,
    Query(params): Query<EmailParams>,
) -> Result<Json<Vec<ChatTurn>>> {
    Ok(Json(service.session_turns(&session_id, params.email()?).await?))
}

async fn update_session(
    State(service): State<Arc<ChatService>>,
    Path(session_id): Path<String>,
    body: std::result::Result<Json<SessionUpdate>, JsonRejection>,
) -> Result<Json<SessionMeta>> {
    let mut update = json_body(body)?;
    update.email = Some(required_email(update.email.as_deref())?.to_owned());

    Ok(Json(service.update_session(&session_id, update).await?))
}
