//! # Effective Configuration
//!
//! File: cli/src/commands/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `career-mentor config`, which prints the merged configuration the
//! process started with: model endpoint, agent persona and server defaults.
//! The API key is reported as present, never printed.
//!
use crate::core::context::AppContext;
use crate::core::error::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing::info;

/// # Config Command Arguments (`ConfigArgs`)
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Also print the full agent instructions.
    #[arg(long)]
    pub instructions: bool,
}

/// # Handle Config Command (`handle_config`)
pub async fn handle_config(args: ConfigArgs, ctx: &AppContext) -> Result<()> {
    info!("Handling config command with args: {:?}", args);
    write_config(&mut io::stdout().lock(), ctx, args.instructions)
}

fn write_config<W: Write>(out: &mut W, ctx: &AppContext, instructions: bool) -> Result<()> {
    let config = ctx.config();
    let model = ctx.model();
    let agent = ctx.agent();

    writeln!(out, "[model]")?;
    writeln!(out, "  name:        {}", model.model)?;
    writeln!(out, "  endpoint:    {}", model.chat_completions_url())?;
    writeln!(
        out,
        "  api key:     {} (from {}, {} chars)",
        model.api_key,
        config.model.api_key_env,
        model.api_key.expose().chars().count()
    )?;
    writeln!(out, "  tracing:     {}", if model.tracing_disabled { "disabled" } else { "enabled" })?;
    writeln!(out, "[agent]")?;
    writeln!(out, "  name:        {}", agent.name)?;
    if instructions {
        for line in agent.instructions.lines() {
            writeln!(out, "    | {}", line)?;
        }
    }
    writeln!(out, "[server]")?;
    writeln!(out, "  address:     {}:{}", config.server.host, config.server.port)?;
    writeln!(out, "  cors:        {}", config.server.enable_cors)?;
    writeln!(out, "  session ttl: {}s", config.server.session_ttl_secs)?;
    Ok(())
}
