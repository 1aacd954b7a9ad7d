//! Account and feedback endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uchat_core::Timestamp;
use uchat_store::{ChatStore, ContactFeedback, FeedbackKind, MessageFeedback};

use crate::error::{ApiError, Result};

const GREETING: &str = "Hello! How can I assist you today?";
const DEFAULT_FEEDBACK_KIND: &str = "Feedback";

pub fn endpoint_router() -> Router<Arc<dyn ChatStore>> {
    Router::new()
        .route("/hello", get(hello))
        .route("/auth/store-user", post(store_user))
        .route("/contact-feedback", post(contact_feedback))
        .route("/message-feedback", post(message_feedback))
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

const OK: StatusResponse = StatusResponse { status: "ok" };

async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse { message: GREETING })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Deserialize)]
struct StoreUserRequest {
    #[serde(default)]
    email: Option<String>,
}

async fn store_user(
    State(store): State<Arc<dyn ChatStore>>,
    body: std::result::Result<Json<StoreUserRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(request) = body?;
    let email = non_blank(request.email).ok_or_else(|| ApiError::InvalidRequest("email is required".to_owned()))?;

    let user = store.upsert_user(&email).await?;
    tracing::debug!(email = %user.email, created_at = %user.created_at, "user stored");

    Ok(Json(OK))
}

#[derive(Debug, Deserialize)]
struct ContactFeedbackRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

async fn contact_feedback(
    State(store): State<Arc<dyn ChatStore>>,
    body: std::result::Result<Json<ContactFeedbackRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(request) = body?;
    let message =
        non_blank(request.message).ok_or_else(|| ApiError::InvalidRequest("message is required".to_owned()))?;

    store
        .add_contact_feedback(ContactFeedback {
            email: non_blank(request.email),
            name: non_blank(request.name),
            kind: non_blank(request.kind).unwrap_or_else(|| DEFAULT_FEEDBACK_KIND.to_owned()),
            message,
            created_at: Timestamp::now(),
        })
        .await?;

    Ok(Json(OK))
}

#[derive(Debug, Deserialize)]
struct MessageFeedbackRequest {
    #[serde(default)]
    message_id: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

fn feedback_kind(kind: Option<&str>) -> Option<FeedbackKind> {
    match kind.map(str::trim) {
        Some("like") => Some(FeedbackKind::Like),
        Some("dislike") => Some(FeedbackKind::Dislike),
        _ => None,
    }
}

async fn message_feedback(
    State(store): State<Arc<dyn ChatStore>>,
    body: std::result::Result<Json<MessageFeedbackRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(request) = body?;

    let (Some(message_id), Some(kind)) = (non_blank(request.message_id), feedback_kind(request.kind.as_deref()))
    else {
        return Err(ApiError::InvalidRequest(
            "message_id and a type of 'like' or 'dislike' are required".to_owned(),
        ));
    };

    store
        .add_message_feedback(MessageFeedback {
            message_id,
            kind,
            email: non_blank(request.email),
            created_at: Timestamp::now(),
        })
        .await?;

    Ok(Json(OK))
}
