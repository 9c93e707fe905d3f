//! # Reply Transport
//!
//! File: cli/src/mentor/transport.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The capability the dispatcher uses to hand a finished reply to whatever
//! host is driving the conversation. A reply is delivered in one call; hosts
//! that render progressively can split it themselves.
//!
//! Two implementations are provided:
//! - `BufferedResponder`: keeps replies in memory (HTTP host, tests)
//! - `ConsoleResponder`: writes `Name: reply` lines to any `AsyncWrite` (terminal host)
//!
use crate::core::error::{MentorError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Delivers assistant replies to the user.
#[async_trait]
pub trait Responder: Send {
    async fn respond(&mut self, content: &str) -> Result<()>;
}

/// Collects replies in delivery order.
#[derive(Debug, Default)]
pub struct BufferedResponder {
    replies: Vec<String>,
}

impl BufferedResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    /// Consumes the responder, returning the most recent reply.
    pub fn into_last(mut self) -> Option<String> {
        self.replies.pop()
    }
}

#[async_trait]
impl Responder for BufferedResponder {
    async fn respond(&mut self, content: &str) -> Result<()> {
        self.replies.push(content.to_string());
        Ok(())
    }
}

/// Prints replies prefixed with the bot's display name.
pub struct ConsoleResponder<W: AsyncWrite + Unpin + Send> {
    name: String,
    out: W,
}

impl<W: AsyncWrite + Unpin + Send> ConsoleResponder<W> {
    pub fn new(name: impl Into<String>, out: W) -> Self {
        Self {
            name: name.into(),
            out,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mutable access to the underlying writer, for host output that is not a reply.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Responder for ConsoleResponder<W> {
    async fn respond(&mut self, content: &str) -> Result<()> {
        let line = format!("{}: {}\n", self.name, content);
        self.out
            .write_all(line.as_bytes())
            .await
            .map_err(transport_error)?;
        self.out.flush().await.map_err(transport_error)
    }
}

fn transport_error(err: io::Error) -> anyhow::Error {
    anyhow!(MentorError::Transport(err.to_string()))
}
