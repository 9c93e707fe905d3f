//! # Career Mentor Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the Career Mentor CLI and
//! makes them accessible to the main entry point (`main.rs`).
//!
//! ## Commands
//!
//! - `serve`: HTTP chat host with per-session history
//! - `chat`: Interactive terminal chat (one session)
//! - `roadmaps`: List the built-in career roadmaps
//! - `config`: Show the effective configuration
//!
//! Each command defines its own arguments structure and handler function.
//!

/// Interactive terminal chat session.
pub mod chat;
/// Effective configuration display.
pub mod config;
/// Knowledge base listing.
pub mod roadmaps;
/// HTTP chat server. Includes configuration, handlers and server logic.
pub mod serve;
