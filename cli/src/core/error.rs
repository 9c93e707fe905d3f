//! # Career Mentor Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout the Career Mentor
//! application. Very little can actually go wrong here: the only fatal
//! condition is a missing API credential at startup, and every chat message
//! produces a reply (unmatched input takes the fallback branch, it is not an
//! error).
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `MentorError`: A custom error enum using `thiserror` for specific error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error kinds cover:
//! - Startup credential resolution
//! - Session lifecycle misuse (message before session start, unknown session)
//! - Configuration validation
//! - Reply delivery through a transport
//!
//! ## Examples
//!
//! ```rust
//! // Pattern matching on error kinds after propagation through anyhow
//! match result {
//!     Err(e) if e.downcast_ref::<MentorError>().map_or(false, |me| matches!(me, MentorError::SessionNotFound { .. })) => {
//!         // Respond with 404
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Career Mentor application.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MentorError {
    #[error("Missing credential: set the {var} environment variable")]
    MissingCredential { var: String },

    #[error("Session has not been initialized")]
    SessionNotInitialized,

    #[error("Session '{id}' not found")]
    SessionNotFound { id: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to deliver reply: {0}")]
    Transport(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
