//! # Language-Model Capability
//!
//! File: cli/src/core/model.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Connection settings for an OpenAI-compatible model endpoint and the mentor
//! agent persona. The chat dispatch path answers from the built-in roadmap
//! table and never calls a model; these types exist so the credential and
//! endpoint are validated at startup and available to whichever component
//! wants them later. No network client is constructed.
//!
use crate::core::config::Config;
use std::fmt;

/// An API key. Redacted in `Debug` and `Display` so it never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw key, for use in an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Everything needed to talk to the model endpoint.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub base_url: String,
    pub api_key: ApiKey,
    pub tracing_disabled: bool,
}

impl ModelSettings {
    pub fn from_config(config: &Config, api_key: ApiKey) -> Self {
        Self {
            model: config.model.name.clone(),
            base_url: config.model.base_url.clone(),
            api_key,
            tracing_disabled: config.model.tracing_disabled,
        }
    }

    /// Chat-completions URL under the configured base.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// The persona the mentor agent would be instructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub name: String,
    pub instructions: String,
}

impl AgentProfile {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.agent.name.clone(),
            instructions: config.agent.instructions.clone(),
        }
    }
}
