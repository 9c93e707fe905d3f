//! # Career Mentor Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system, handling loading, merging,
//! validation, and credential resolution. It supports a multi-level approach
//! that combines defaults, user settings, and project-specific overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.career-mentor.toml` in current directory or ancestors
//! 2. User-specific `<config dir>/career-mentor/config.toml`
//! 3. Default values defined in the code
//!
//! Command-line flags of the `serve` command sit above all three for the
//! `[server]` section (see `commands::serve::config`).
//!
//! The API key itself never lives in a file. `[model].api_key_env` names the
//! environment variable that holds it, and `resolve_credential` reads it once
//! at startup. A missing key is the only fatal condition in the application.
//!
//! ## Examples
//!
//! ```toml
//! [model]
//! name = "gemini-2.0-flash"
//! api_key_env = "GEMINI_API_KEY"
//!
//! [server]
//! port = 9000
//! enable_cors = false
//! session_ttl_secs = 600
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let key = config::resolve_credential(&cfg)?;
//! ```
//!
use crate::core::error::{MentorError, Result};
use crate::core::model::ApiKey;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub server: ServerDefaults,
}

/// Settings for the language-model client. Built at startup, never called by dispatch.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Model identifier sent to the provider.
    #[serde(default = "default_model_name")]
    pub name: String,
    /// OpenAI-compatible endpoint base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_tracing_disabled")]
    pub tracing_disabled: bool,
}

/// Persona for the mentor agent.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    #[serde(default = "default_agent_name")]
    pub name: String,
    #[serde(default = "default_agent_instructions")]
    pub instructions: String,
}

/// Defaults for `career-mentor serve`, overridable by command-line flags.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerDefaults {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
    /// Sessions idle for longer than this many seconds are ended by the host.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            tracing_disabled: default_tracing_disabled(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            instructions: default_agent_instructions(),
        }
    }
}

impl Default for ServerDefaults {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_model_name() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/".to_string()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
fn default_tracing_disabled() -> bool {
    true
}
fn default_agent_name() -> String {
    "CareerMentorAgent".to_string()
}
fn default_agent_instructions() -> String {
    "You are a Career Mentor. Guide users through three types of requests:\n\n\
     1. Suggest suitable career paths based on their interests.\n\
     2. Provide skill roadmaps for a specific career.\n\
     3. Suggest real-world job titles/roles related to a chosen field.\n\n\
     Be concise, helpful, and personalized in your replies."
        .to_string()
}
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_port() -> u16 {
    8000
}
fn default_enable_cors() -> bool {
    true
}
fn default_session_ttl_secs() -> u64 {
    30 * 60
}

const PROJECT_CONFIG_FILENAME: &str = ".career-mentor.toml";

/// Loads, merges and validates configuration from all file sources.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

/// # Resolve Credential (`resolve_credential`)
///
/// Reads the API key from the environment variable named by
/// `config.model.api_key_env`.
///
/// ## Errors
///
/// Returns `MentorError::MissingCredential` if the variable is unset or empty.
pub fn resolve_credential(config: &Config) -> Result<ApiKey> {
    resolve_credential_with(config, |var| std::env::var(var).ok())
}

fn resolve_credential_with<F>(config: &Config, lookup: F) -> Result<ApiKey>
where
    F: Fn(&str) -> Option<String>,
{
    let var = &config.model.api_key_env;
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => {
            debug!("Resolved API key from {}", var);
            Ok(ApiKey::new(value))
        }
        _ => Err(anyhow!(MentorError::MissingCredential { var: var.clone() })),
    }
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "CareerMentor", "career-mentor") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
        Ok(None)
    }
}

/// Walks from `start` up through its ancestors, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let project_config = dir.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if dir.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let defaults = Config::default();

    fn pick<T: PartialEq>(project: T, user: T, default: &T) -> T {
        if project != *default {
            project
        } else {
            user
        }
    }

    Config {
        model: ModelConfig {
            name: pick(project.model.name, user.model.name, &defaults.model.name),
            base_url: pick(
                project.model.base_url,
                user.model.base_url,
                &defaults.model.base_url,
            ),
            api_key_env: pick(
                project.model.api_key_env,
                user.model.api_key_env,
                &defaults.model.api_key_env,
            ),
            tracing_disabled: pick(
                project.model.tracing_disabled,
                user.model.tracing_disabled,
                &defaults.model.tracing_disabled,
            ),
        },
        agent: AgentConfig {
            name: pick(project.agent.name, user.agent.name, &defaults.agent.name),
            instructions: pick(
                project.agent.instructions,
                user.agent.instructions,
                &defaults.agent.instructions,
            ),
        },
        server: ServerDefaults {
            host: pick(project.server.host, user.server.host, &defaults.server.host),
            port: pick(project.server.port, user.server.port, &defaults.server.port),
            enable_cors: pick(
                project.server.enable_cors,
                user.server.enable_cors,
                &defaults.server.enable_cors,
            ),
            session_ttl_secs: pick(
                project.server.session_ttl_secs,
                user.server.session_ttl_secs,
                &defaults.server.session_ttl_secs,
            ),
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let invalid = |msg: String| -> Result<()> { Err(anyhow!(MentorError::Config(msg))) };

    if config.model.name.trim().is_empty() {
        return invalid("model.name cannot be empty".into());
    }
    if config.model.api_key_env.trim().is_empty() {
        return invalid("model.api_key_env cannot be empty".into());
    }
    let url = &config.model.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return invalid(format!(
            "model.base_url '{}' must start with http:// or https://",
            url
        ));
    }
    if config.server.port == 0 {
        return invalid("server.port must be non-zero".into());
    }
    if config.server.session_ttl_secs == 0 {
        return invalid("server.session_ttl_secs must be non-zero".into());
    }
    debug!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [model]
            name = "gemini-1.5-pro"
            api_key_env = "MENTOR_KEY"

            [server]
            host = "0.0.0.0"
            port = 9000
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.model.name, "gemini-1.5-pro");
        assert_eq!(config.model.api_key_env, "MENTOR_KEY");
        assert_eq!(config.model.base_url, default_base_url()); // Default
        assert!(config.model.tracing_disabled);
        assert_eq!(config.agent.name, "CareerMentorAgent");
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(config.server.enable_cors);
        assert_eq!(config.server.session_ttl_secs, 1800);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[model]\nnmae = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            model: ModelConfig {
                name: "user-model".into(),
                ..Default::default()
            },
            server: ServerDefaults {
                port: 7000,
                ..Default::default()
            },
            ..Default::default()
        };
        let project = Config {
            server: ServerDefaults {
                port: 9100,
                enable_cors: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.model.name, "user-model"); // Project left it at default
        assert_eq!(merged.server.port, 9100);
        assert!(!merged.server.enable_cors);
    }

    #[test]
    fn test_merge_without_project_keeps_user() {
        let user = Config {
            agent: AgentConfig {
                name: "Coach".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(merge_configs(user.clone(), None), user);
    }

    #[test]
    fn test_validate_config_defaults_ok() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_base_url() {
        let config = Config {
            model: ModelConfig {
                base_url: "generativelanguage.googleapis.com".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with http"));
    }

    #[test]
    fn test_validate_config_zero_port() {
        let config = Config {
            server: ServerDefaults {
                port: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_session_ttl() {
        let config: Config = toml::from_str("[server]\nsession_ttl_secs = 0\n").unwrap();
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("session_ttl_secs"));
    }

    #[test]
    fn test_find_project_config_in_ancestor() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        let found = find_project_config_path(&nested);
        assert_eq!(found, Some(temp_dir.path().join(PROJECT_CONFIG_FILENAME)));
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(find_project_config_path(&repo), None);
    }

    #[test]
    fn test_resolve_credential_present() {
        let config = Config::default();
        let key = resolve_credential_with(&config, |var| {
            assert_eq!(var, "GEMINI_API_KEY");
            Some("secret-value".into())
        })
        .unwrap();
        assert_eq!(key.expose(), "secret-value");
    }

    #[test]
    fn test_resolve_credential_missing_or_empty() {
        let config = Config::default();
        for lookup_result in [None, Some(String::new()), Some("   ".to_string())] {
            let err = resolve_credential_with(&config, |_| lookup_result.clone()).unwrap_err();
            assert_eq!(
                err.downcast_ref::<MentorError>(),
                Some(&MentorError::MissingCredential {
                    var: "GEMINI_API_KEY".into()
                })
            );
        }
    }
}
