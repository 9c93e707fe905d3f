//! # Session State
//!
//! File: cli/src/mentor/session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Conversation history, scoped to one chat session.
//!
//! - `Turn` / `Role`: one immutable message and who sent it.
//! - `SessionStore`: the ordered, append-only turn list of a single session.
//!   It starts out uninitialized; `init_session` moves it to the active state.
//! - `SessionRegistry`: the session-scoped store a host uses to keep many
//!   isolated sessions, keyed by an opaque `SessionId`. Each session sits behind
//!   its own async lock so messages for one session are handled one at a time
//!   while other sessions proceed independently.
//!
//! Nothing here is persisted; a session's history is dropped when the session
//! ends, either explicitly or by `expire_idle` once it has been idle too long.
//!
use crate::core::error::MentorError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only turn history for one session.
///
/// `None` means the session has not been started yet.
#[derive(Debug, Default)]
pub struct SessionStore {
    history: Option<Vec<Turn>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the history to an empty sequence and marks the session active.
    pub fn init_session(&mut self) {
        self.history = Some(Vec::new());
    }

    pub fn is_initialized(&self) -> bool {
        self.history.is_some()
    }

    /// Appends `turn` to the end of the history.
    pub fn append_turn(&mut self, turn: Turn) -> Result<(), MentorError> {
        let history = self
            .history
            .as_mut()
            .ok_or(MentorError::SessionNotInitialized)?;
        history.push(turn);
        Ok(())
    }

    /// Read-only view of the history in arrival order.
    pub fn history(&self) -> Result<&[Turn], MentorError> {
        self.history
            .as_deref()
            .ok_or(MentorError::SessionNotInitialized)
    }
}

/// Opaque session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live session: identity, start and last-use times, and its turn history.
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub store: SessionStore,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            started_at: now,
            last_active: now,
            store: SessionStore::new(),
        }
    }

    /// Marks the session as used now.
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// All live sessions of one host process.
#[derive(Debug, Default, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh, not yet initialized session under a new id.
    pub async fn start(&self) -> (SessionId, SessionHandle) {
        let id = SessionId::generate();
        let handle = Arc::new(Mutex::new(Session::new(id.clone())));
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::clone(&handle));
        debug!("Session {} registered", id);
        (id, handle)
    }

    pub async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Removes a session and its history. Returns `false` if it was unknown.
    pub async fn end(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!("Session {} ended", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// # Expire Idle Sessions (`expire_idle`)
    ///
    /// Ends every session whose `last_active` is more than `ttl` in the past
    /// and returns how many were removed. A session whose lock is currently
    /// held is being used and is kept.
    pub async fn expire_idle(&self, ttl: Duration) -> usize {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, handle| match handle.try_lock() {
            Ok(session) if now - session.last_active > ttl => {
                debug!("Session {} expired after {}s idle", id, ttl.num_seconds());
                false
            }
            _ => true,
        });
        before - sessions.len()
    }
}
