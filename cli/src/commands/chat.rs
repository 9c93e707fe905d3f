//! # Terminal Chat
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `career-mentor chat`: a single session driven from the terminal.
//! The mentor greets, then each line read from stdin is one user message.
//!
//! - `/history` prints the turns recorded so far
//! - `/exit` or end of input ends the session
//! - Blank lines are ignored
//!
//! ## Examples
//!
//! ```bash
//! career-mentor chat
//! echo "roadmap for a data scientist" | career-mentor chat --name Coach
//! ```
//!
use crate::core::error::Result;
use crate::mentor::dispatcher::Dispatcher;
use crate::mentor::session::SessionStore;
use crate::mentor::transport::ConsoleResponder;
use anyhow::Context;
use clap::Parser;
use std::fmt::Write as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// # Chat Command Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Display name shown in front of the mentor's replies.
    #[arg(long, default_value = "Mentor")]
    pub name: String,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Runs one interactive session on stdin/stdout.
pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);

    let reader = BufReader::new(tokio::io::stdin());
    let mut responder = ConsoleResponder::new(args.name, tokio::io::stdout());
    let session = run_repl(Dispatcher::default(), reader, &mut responder).await?;

    let turns = session.history().map(<[_]>::len).unwrap_or(0);
    info!("Chat session finished after {} turns", turns);
    Ok(())
}

/// # Run Chat Loop (`run_repl`)
///
/// Starts a session, then dispatches every non-command line from `reader`
/// until `/exit` or end of input. Returns the finished session.
pub async fn run_repl<R, W>(
    dispatcher: Dispatcher,
    reader: R,
    responder: &mut ConsoleResponder<W>,
) -> Result<SessionStore>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    let mut session = SessionStore::new();
    dispatcher.on_chat_start(&mut session, responder).await?;
    write_terminal(
        responder.writer(),
        "(Type /history to review the conversation, /exit to quit.)\n",
    )
    .await?;

    let mut lines = reader.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        match line.trim() {
            "" => continue,
            "/exit" => break,
            "/history" => {
                let listing = format_history(&session)?;
                write_terminal(responder.writer(), &listing).await?;
                continue;
            }
            _ => {}
        }

        let reply = dispatcher.on_message(&mut session, &line, responder).await?;
        debug!(fallback = reply.is_fallback(), career = ?reply.career, "Reply sent");
    }

    let farewell = format!("{}: Goodbye! Good luck with your career.\n", responder.name());
    write_terminal(responder.writer(), &farewell).await?;
    Ok(session)
}

async fn write_terminal<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .await
        .context("Failed to write to terminal")?;
    out.flush().await.context("Failed to write to terminal")?;
    Ok(())
}

fn format_history(session: &SessionStore) -> Result<String> {
    let history = session.history()?;
    let mut out = String::new();
    if history.is_empty() {
        out.push_str("(No messages yet.)\n");
    }
    for turn in history {
        writeln!(out, "[{}] {}", turn.role, turn.content)?;
    }
    Ok(out)
}
