use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use uchat_core::Timestamp;

use crate::{
    ChatStore,
    error::{Result, StoreError},
    records::{
        ChatTurn, ContactFeedback, FileRecord, MessageFeedback, SessionMeta, SessionSummary, SessionUpdate, User,
        Visitor,
    },
};

/// Characters of the first user message used as a derived session title
const TITLE_CHARS: usize = 50;

struct Session {
    owner: Option<String>,
    meta: SessionMeta,
    turns: Vec<ChatTurn>,
}

impl Session {
    fn new(session_id: &str, owner: Option<String>) -> Self {
        Self {
            owner,
            meta: SessionMeta {
                session_id: session_id.to_owned(),
                title: None,
                pinned: false,
                archived: false,
            },
            turns: Vec::new(),
        }
    }

    fn owned_by(&self, email: &str) -> bool {
        self.owner.as_deref() == Some(email)
    }

    /// Sessions that were never claimed are open to any caller
    fn visible_to(&self, email: Option<&str>) -> bool {
        self.owner.is_none() || email.is_some_and(|email| self.owned_by(email))
    }

    fn summary(&self) -> Option<SessionSummary> {
        let first = self.turns.first()?;
        let last = self.turns.last()?;

        let title = self.meta.title.clone().unwrap_or_else(|| derive_title(&first.user_message));

        Some(SessionSummary {
            session_id: self.meta.session_id.clone(),
            title,
            last_message: last.user_message.clone(),
            updated_at: last.timestamp,
            message_count: self.turns.len(),
            pinned: self.meta.pinned,
            archived: self.meta.archived,
        })
    }
}

fn derive_title(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= TITLE_CHARS {
        return trimmed.to_owned();
    }

    let mut title: String = trimmed.chars().take(TITLE_CHARS).collect();
    title.truncate(title.trim_end().len());
    title.push_str("...");
    title
}

/// In-process [`ChatStore`]
///
/// Turns without a session id are kept but never show up in history.
#[derive(Default)]
pub struct MemoryStore {
    sessions: DashMap<String, Session>,
    loose_turns: DashMap<String, ChatTurn>,
    visitors: DashMap<String, Visitor>,
    users: DashMap<String, User>,
    files: DashMap<String, FileRecord>,
    contact_feedback: Mutex<Vec<ContactFeedback>>,
    message_feedback: Mutex<Vec<MessageFeedback>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visitor(&self, ip: &str) -> Option<Visitor> {
        self.visitors.get(ip).map(|entry| entry.clone())
    }

    pub fn user(&self, email: &str) -> Option<User> {
        self.users.get(email).map(|entry| entry.clone())
    }

    pub fn file(&self, file_id: &str) -> Option<FileRecord> {
        self.files.get(file_id).map(|entry| entry.clone())
    }

    /// Look up a turn by message id, in or out of a session
    pub fn turn(&self, message_id: &str) -> Option<ChatTurn> {
        if let Some(turn) = self.loose_turns.get(message_id) {
            return Some(turn.clone());
        }

        self.sessions
            .iter()
            .find_map(|session| session.turns.iter().find(|t| t.message_id == message_id).cloned())
    }

    pub fn contact_feedback(&self) -> Result<Vec<ContactFeedback>> {
        let entries = self.contact_feedback.lock().map_err(|_| poisoned("contact feedback"))?;
        Ok(entries.clone())
    }

    pub fn message_feedback(&self) -> Result<Vec<MessageFeedback>> {
        let entries = self.message_feedback.lock().map_err(|_| poisoned("message feedback"))?;
        Ok(entries.clone())
    }
}

fn poisoned(what: &str) -> StoreError {
    StoreError::Backend(format!("{what} lock poisoned"))
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn append_turn(&self, turn: ChatTurn) -> Result<()> {
        let Some(session_id) = turn.session_id.clone() else {
            self.loose_turns.insert(turn.message_id.clone(), turn);
            return Ok(());
        };

        let mut session = self
            .sessions
            .entry(session_id.clone())
            .or_insert_with(|| Session::new(&session_id, turn.user_email.clone()));

        // Sessions started anonymously are claimed by the first signed-in turn
        if session.owner.is_none() {
            session.owner.clone_from(&turn.user_email);
        }

        session.turns.push(turn);
        Ok(())
    }

    async fn history(&self, email: &str) -> Result<Vec<SessionSummary>> {
        let mut summaries: Vec<SessionSummary> = self
            .sessions
            .iter()
            .filter(|session| session.owned_by(email))
            .filter_map(|session| session.summary())
            .collect();

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn session_turns(&self, session_id: &str, email: Option<&str>) -> Result<Vec<ChatTurn>> {
        let session = self
            .sessions
            .get(session_id)
            .filter(|session| session.visible_to(email))
            .ok_or_else(|| StoreError::NotFound(format!("session '{session_id}'")))?;

        let mut turns = session.turns.clone();
        turns.sort_by_key(|turn| turn.timestamp);
        Ok(turns)
    }

    async fn update_session(&self, session_id: &str, update: SessionUpdate) -> Result<SessionMeta> {
        let not_found = || StoreError::NotFound(format!("session '{session_id}'"));

        let mut session = self.sessions.get_mut(session_id).ok_or_else(not_found)?;

        if !session.visible_to(update.email.as_deref()) {
            return Err(not_found());
        }

        if let Some(title) = update.title {
            let title = title.trim();
            session.meta.title = (!title.is_empty()).then(|| title.to_owned());
        }
        if let Some(pinned) = update.pinned {
            session.meta.pinned = pinned;
        }
        if let Some(archived) = update.archived {
            session.meta.archived = archived;
        }

        Ok(session.meta.clone())
    }

    async fn track_visitor(&self, visitor: Visitor) -> Result<()> {
        self.visitors
            .entry(visitor.ip.clone())
            .and_modify(|existing| {
                existing.last_active = visitor.last_active;
                existing.browser.clone_from(&visitor.browser);
                existing.os.clone_from(&visitor.os);
                existing.device.clone_from(&visitor.device);
                existing.ua.clone_from(&visitor.ua);
            })
            .or_insert(visitor);

        Ok(())
    }

    async fn upsert_user(&self, email: &str) -> Result<User> {
        let now = Timestamp::now();

        let user = self
            .users
            .entry(email.to_owned())
            .and_modify(|user| user.last_login = now)
            .or_insert_with(|| User {
                email: email.to_owned(),
                created_at: now,
                last_login: now,
            })
            .clone();

        Ok(user)
    }

    async fn add_contact_feedback(&self, feedback: ContactFeedback) -> Result<()> {
        self.contact_feedback
            .lock()
            .map_err(|_| poisoned("contact feedback"))?
            .push(feedback);
        Ok(())
    }

    async fn add_message_feedback(&self, feedback: MessageFeedback) -> Result<()> {
        self.message_feedback
            .lock()
            .map_err(|_| poisoned("message feedback"))?
            .push(feedback);
        Ok(())
    }

    async fn record_file(&self, file: FileRecord) -> Result<()> {
        self.files.insert(file.file_id.clone(), file);
        Ok(())
    }
}
