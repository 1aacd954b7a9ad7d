use serde::{Deserialize, Serialize};
use uchat_core::Timestamp;

/// One completed user/assistant exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub message_id: String,
    pub session_id: Option<String>,
    pub user_email: Option<String>,
    pub timestamp: Timestamp,
    pub user_message: String,
    pub ai_reply: String,
    pub image_urls: Vec<String>,
}

/// Mutable metadata of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMeta {
    pub session_id: String,
    pub title: Option<String>,
    pub pinned: bool,
    pub archived: bool,
}

/// Partial update of [`SessionMeta`]; `None` fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionUpdate {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub pinned: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
}

/// Row of the history listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub title: String,
    pub last_message: String,
    pub updated_at: Timestamp,
    pub message_count: usize,
    pub pinned: bool,
    pub archived: bool,
}

/// Anonymous caller seen by `/chat`, keyed by address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visitor {
    pub ip: String,
    pub browser: String,
    pub os: String,
    pub device: String,
    pub ua: String,
    pub first_visit: Timestamp,
    pub last_active: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub email: String,
    pub created_at: Timestamp,
    pub last_login: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFeedback {
    pub email: Option<String>,
    pub name: Option<String>,
    pub kind: String,
    pub message: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Like,
    Dislike,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageFeedback {
    pub message_id: String,
    pub kind: FeedbackKind,
    pub email: Option<String>,
    pub created_at: Timestamp,
}

/// Uploaded or transcribed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub file_id: String,
    pub original_name: String,
    pub content_type: Option<String>,
    pub extracted_chars: usize,
    pub uploaded_at: Timestamp,
}
