//! # Career Mentor Chat Server
//!
//! File: cli/src/commands/serve/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Hosts the mentor over HTTP. Clients start a session, post messages to it,
//! and read back its history; each session keeps its own turn list for as
//! long as the server runs or until the client ends it.
//!
//! ## Architecture
//!
//! - `config.rs`: Command-line flags layered over the `[server]` config section
//! - `handlers.rs`: The JSON chat API and its session registry state
//! - `server_logic.rs`: Binding, middleware and graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! career-mentor serve --port 9000
//! curl -X POST localhost:9000/api/sessions
//! curl -X POST localhost:9000/api/sessions/<id>/messages \
//!      -H 'content-type: application/json' -d '{"content":"seo roadmap?"}'
//! ```
//!
use crate::core::context::AppContext;
use crate::core::error::Result;
use std::sync::Arc;
use tracing::info;

pub use config::ServeArgs;

/// Flag and config-file merging for the chat server.
pub mod config;

/// The chat API routes.
pub mod handlers;

/// Axum server setup and lifecycle.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Resolves the effective server settings and runs the server until shutdown.
pub async fn handle_serve(args: ServeArgs, ctx: Arc<AppContext>) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let config = config::resolve_server_config(&args, &ctx.config().server);
    info!("Effective server config: {:?}", config);

    server_logic::run_server(config, &ctx.agent().name).await
}
