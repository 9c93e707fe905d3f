//! # Conversational Dispatcher
//!
//! File: cli/src/mentor/dispatcher.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns one inbound user message into exactly one assistant reply. It is the
//! only component that mutates session history.
//!
//! ## Architecture
//!
//! The host drives two lifecycle hooks, each given the session explicitly:
//! - `on_chat_start`: initializes the session history and sends the greeting
//! - `on_message`: composes a reply, records the user and assistant turns
//!   (in that order), then delivers the reply through the `Responder`
//!
//! Reply composition (`compose`) is total. Text that names one of the known
//! careers yields that career's roadmap; anything else, including empty
//! input, yields the fallback help message.
//!
//! History is updated before the reply is awaited, so a reply that is slow
//! to deliver never leaves the history half-written.
//!
use super::roadmap::{self, RoadmapEntry, ROADMAPS};
use super::session::{SessionStore, Turn};
use super::transport::Responder;
use crate::core::error::{MentorError, Result};
use tracing::{debug, info};

/// Sent when a session starts. Not recorded in history.
pub const GREETING: &str =
    "👩‍💼 Hello! I'm your Career Mentor. Ask me about careers, skills to learn, or job roles.";

/// Sent when no career key matches the message.
pub const FALLBACK: &str = "❓ I don’t have a predefined roadmap for that career yet.\n\n\
But I can still help! Please tell me more about the field or interest you have.\n\n\
You can also try asking about:\n\
- Web Developer\n- Data Scientist\n- AI Engineer\n- SEO Expert\n- Graphic Designer";

/// An assistant reply and the career it was drawn from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub career: Option<&'static str>,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        self.career.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    entries: &'static [RoadmapEntry],
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&ROADMAPS)
    }
}

impl Dispatcher {
    pub fn new(entries: &'static [RoadmapEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [RoadmapEntry] {
        self.entries
    }

    /// # Compose Reply (`compose`)
    ///
    /// Picks the first roadmap (in declaration order) whose key occurs in
    /// `content`, case-insensitively, and formats it. Falls back to `FALLBACK`.
    pub fn compose(&self, content: &str) -> Reply {
        match roadmap::match_roadmap(self.entries, content) {
            Some(entry) => Reply {
                text: entry.format_reply(),
                career: Some(entry.career_key),
            },
            None => Reply {
                text: FALLBACK.to_string(),
                career: None,
            },
        }
    }

    /// # Session Start Hook (`on_chat_start`)
    ///
    /// Resets `session` to an empty history and sends the greeting.
    pub async fn on_chat_start<R>(&self, session: &mut SessionStore, responder: &mut R) -> Result<()>
    where
        R: Responder + ?Sized,
    {
        session.init_session();
        debug!("Session initialized, sending greeting");
        responder.respond(GREETING).await
    }

    /// # Message Hook (`on_message`)
    ///
    /// Handles one user message.
    ///
    /// ## Errors
    ///
    /// - `MentorError::SessionNotInitialized` if `on_chat_start` was never called
    ///   for this session. Nothing is recorded or sent in that case.
    /// - Any delivery error from `responder`. The turns are already recorded.
    pub async fn on_message<R>(
        &self,
        session: &mut SessionStore,
        content: &str,
        responder: &mut R,
    ) -> Result<Reply>
    where
        R: Responder + ?Sized,
    {
        if !session.is_initialized() {
            return Err(MentorError::SessionNotInitialized.into());
        }

        let reply = self.compose(content);
        match reply.career {
            Some(career) => info!(career, "Matched roadmap"),
            None => info!("No roadmap matched, sending fallback"),
        }

        session.append_turn(Turn::user(content))?;
        session.append_turn(Turn::assistant(reply.text.clone()))?;

        responder.respond(&reply.text).await?;
        Ok(reply)
    }
}
