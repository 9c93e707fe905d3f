//! # Career Mentor Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure components used by the command
//! modules and the conversational core.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, validation and credential resolution
//! - `context`: The `AppContext` built once at startup and passed by reference
//! - `error`: Error types and error handling utilities
//! - `model`: Language-model endpoint settings and agent persona
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::context::AppContext; // Shared startup state
//! use crate::core::error::{MentorError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod context;
pub mod error;
pub mod model;
