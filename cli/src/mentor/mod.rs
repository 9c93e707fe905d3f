//! # Career Mentor Conversational Core
//!
//! File: cli/src/mentor/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The host-independent part of the mentor: session history, the roadmap
//! knowledge base, the dispatcher that answers messages, and the transport
//! capability replies are delivered through. The `serve` and `chat` commands
//! are thin hosts around these pieces.
//!
//! ## Architecture
//!
//! - `session`: `Turn`, `SessionStore` and the multi-session `SessionRegistry`
//! - `roadmap`: The static `RoadmapEntry` table and first-match lookup
//! - `dispatcher`: `Dispatcher` with the `on_chat_start` / `on_message` hooks
//! - `transport`: The `Responder` trait and its buffered and console implementations
//!
pub mod dispatcher;
pub mod roadmap;
pub mod session;
pub mod transport;
