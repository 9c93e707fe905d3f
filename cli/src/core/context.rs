//! # Application Context
//!
//! File: cli/src/core/context.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `AppContext` is built exactly once in `main`, after configuration has been
//! loaded and the credential resolved, and is then shared by reference (`Arc`)
//! with the chat hosts. Nothing in the application reads configuration from
//! global state.
//!
//! The model settings are held as an uninitialized capability: they are only
//! assembled the first time `model()` is called.
//!
use crate::core::config::Config;
use crate::core::model::{AgentProfile, ApiKey, ModelSettings};
use std::sync::OnceLock;
use tracing::debug;

#[derive(Debug)]
pub struct AppContext {
    config: Config,
    api_key: ApiKey,
    model: OnceLock<ModelSettings>,
}

impl AppContext {
    pub fn new(config: Config, api_key: ApiKey) -> Self {
        Self {
            config,
            api_key,
            model: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the model settings, assembling them on first use.
    pub fn model(&self) -> &ModelSettings {
        self.model.get_or_init(|| {
            debug!("Initializing model settings for {}", self.config.model.name);
            ModelSettings::from_config(&self.config, self.api_key.clone())
        })
    }

    #[cfg(test)]
    pub fn is_model_initialized(&self) -> bool {
        self.model.get().is_some()
    }

    pub fn agent(&self) -> AgentProfile {
        AgentProfile::from_config(&self.config)
    }
}
