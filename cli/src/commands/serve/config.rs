//! # Chat Server Configuration
//!
//! File: cli/src/commands/serve/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Combines the `[server]` section of the loaded configuration with the
//! `career-mentor serve` command-line flags:
//! 1. Command-line arguments (highest priority, when explicitly set)
//! 2. `[server]` from `.career-mentor.toml` / the user config file
//! 3. Default values (lowest priority)
//!
//! A flag counts as "explicitly set" when it differs from its clap default.
//! `--no-cors` always wins when present.
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! port = 9000
//! host = "0.0.0.0"
//! enable_cors = false
//! session_ttl_secs = 600
//! ```
//!
use crate::core::config::ServerDefaults;
use clap::Parser;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

/// # Serve Command Arguments (`ServeArgs`)
///
/// Command-line arguments accepted by `career-mentor serve`.
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on. If it is taken, the next free port is used.
    #[arg(long, short, default_value_t = 8000)]
    pub port: u16,

    /// Address to bind. Use `0.0.0.0` to accept connections from other machines.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// Effective settings for the chat server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
    /// Idle time after which a session is ended.
    pub session_ttl: Duration,
}

/// # Resolve Server Configuration (`resolve_server_config`)
///
/// Layers `args` over the file-level `defaults`.
pub fn resolve_server_config(args: &ServeArgs, defaults: &ServerDefaults) -> ServerConfig {
    let cli_defaults = ServeArgs::parse_from([""]);

    let port = if args.port != cli_defaults.port {
        args.port
    } else {
        defaults.port
    };
    let host = if args.host != cli_defaults.host {
        args.host
    } else {
        defaults.host
    };
    let enable_cors = !args.no_cors && defaults.enable_cors;

    let config = ServerConfig {
        port,
        host,
        enable_cors,
        session_ttl: Duration::from_secs(defaults.session_ttl_secs),
    };
    debug!("Resolved server config: {:?}", config);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn args(argv: &[&str]) -> ServeArgs {
        ServeArgs::parse_from(std::iter::once("serve").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults_come_from_file_section() {
        let file = ServerDefaults {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 9100,
            enable_cors: false,
            session_ttl_secs: 60,
        };
        let config = resolve_server_config(&args(&[]), &file);
        assert_eq!(
            config,
            ServerConfig {
                port: 9100,
                host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                enable_cors: false,
                session_ttl: Duration::from_secs(60),
            }
        );
    }

    #[test]
    fn test_explicit_flags_win() {
        let file = ServerDefaults {
            port: 9100,
            ..Default::default()
        };
        let config = resolve_server_config(&args(&["--port", "9300", "--no-cors"]), &file);
        assert_eq!(config.port, 9300);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_all_defaults() {
        let config = resolve_server_config(&args(&[]), &ServerDefaults::default());
        assert_eq!(config.port, 8000);
        assert!(config.enable_cors);
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
    }
}
