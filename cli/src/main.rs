//! # Career Mentor Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Career Mentor CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and resolving the API credential
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! The credential check runs before any command, so a missing key stops the
//! process before a single chat session can start. `--help` and `--version`
//! are answered by Clap earlier still and never need a key.
//!
//! ## Examples
//!
//! ```bash
//! export GEMINI_API_KEY=...
//! career-mentor chat
//! career-mentor -v serve --port 9000
//! career-mentor roadmaps --career "ai engineer"
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration and resolve the credential (fatal if missing)
//! 4. Route to the command handler
//! 5. Format and display any errors that occur
//!
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (serve, chat, ...)
mod core; // Core infrastructure (config, context, errors, model settings)
mod mentor; // Conversational core (sessions, roadmaps, dispatcher, transport)

use crate::core::context::AppContext;
use crate::core::error::Result;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "career-mentor",
    about = "👩‍💼 Career Mentor: skill roadmaps for the careers you ask about",
    long_about = "Chat with a career mentor over HTTP or in the terminal.\n\
                  Ask about a career and get its skill roadmap.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the chat API over HTTP.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    /// Chat in the terminal.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// List the built-in career roadmaps.
    #[command(alias = "r")]
    Roadmaps(commands::roadmaps::RoadmapsArgs),
    /// Show the effective configuration.
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match startup() {
        Ok(ctx) => run(cli.command, ctx).await,
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Loads configuration and resolves the credential into the shared context.
fn startup() -> Result<Arc<AppContext>> {
    let config = crate::core::config::load_config()?;
    let api_key = crate::core::config::resolve_credential(&config)?;
    tracing::info!(
        "Configured model {} at {} (client not started)",
        config.model.name,
        config.model.base_url
    );
    Ok(Arc::new(AppContext::new(config, api_key)))
}

async fn run(command: Commands, ctx: Arc<AppContext>) -> Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle_serve(args, ctx).await,
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Roadmaps(args) => commands::roadmaps::handle_roadmaps(args).await,
        Commands::Config(args) => commands::config::handle_config(args, &ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_serve_flags() {
        let cli = Cli::parse_from(["career-mentor", "-vv", "serve", "--port", "9001", "--no-cors"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 9001);
                assert!(args.no_cors);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
